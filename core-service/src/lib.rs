//! Carousel core façade.
//!
//! Wires the gallery store, media store, and rotation machinery into one
//! handle for host applications (HTTP glue, desktop shells). The façade owns
//! the lifecycle rules the individual crates leave to their caller: every
//! committed mutation feeds the rotation controller's remap and re-syncs the
//! single background timer.

pub mod error;
pub mod events;
pub mod logging;

pub use error::{CoreError, Result};
pub use events::{CarouselEvent, EventBus, GalleryEvent, RotationEvent};
pub use logging::{init_logging, LogFormat, LoggingConfig};

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use sqlx::SqlitePool;
use tracing::info;

use core_gallery::repositories::SqliteImageRepository;
use core_gallery::{GalleryImage, ImagePatch, OrderChange, ReorderGesture, SequenceStore};
use core_media::MediaStore;
use core_rotation::{RotationConfig, RotationController, RotationTicker};

/// Primary façade exposed to host applications.
pub struct CarouselService {
    store: SequenceStore,
    media: Arc<dyn MediaStore>,
    rotation: Arc<Mutex<RotationController>>,
    ticker: Mutex<RotationTicker>,
    config: Mutex<RotationConfig>,
    events: EventBus,
}

impl CarouselService {
    /// Create a service over an open gallery database pool.
    ///
    /// Loads the current collection into the rotation controller and starts
    /// the timer if the collection warrants one.
    pub async fn new(
        pool: SqlitePool,
        media: Arc<dyn MediaStore>,
        config: RotationConfig,
    ) -> Result<Self> {
        config
            .validate()
            .map_err(CoreError::InvalidConfig)?;

        let store = SequenceStore::new(
            Arc::new(SqliteImageRepository::new(pool)),
            Arc::clone(&media),
        );

        let service = Self {
            store,
            media,
            rotation: Arc::new(Mutex::new(RotationController::new())),
            ticker: Mutex::new(RotationTicker::new()),
            config: Mutex::new(config),
            events: EventBus::default(),
        };

        let initial = service.store.list().await?;
        let initial_ids: Vec<String> = initial.iter().map(|i| i.id.clone()).collect();
        service.rotation.lock().on_order_changed(&[], &initial_ids);
        service.sync_ticker();

        info!(count = initial.len(), "Carousel service started");
        Ok(service)
    }

    /// Subscribe to gallery and rotation events.
    pub fn subscribe(&self) -> events::Receiver<CarouselEvent> {
        self.events.subscribe()
    }

    // ------------------------------------------------------------------
    // Gallery operations
    // ------------------------------------------------------------------

    /// All images in display order.
    pub async fn list_ordered(&self) -> Result<Vec<GalleryImage>> {
        Ok(self.store.list().await?)
    }

    /// Store a media payload and append a new image at the end of the order.
    pub async fn insert_item(
        &self,
        title: String,
        description: Option<String>,
        data: Bytes,
        content_type: &str,
    ) -> Result<GalleryImage> {
        let media_ref = self.media.store(data, content_type).await?;

        let inserted = self.store.insert(title, description, media_ref.clone()).await;
        let (image, change) = match inserted {
            Ok(ok) => ok,
            Err(e) => {
                // The record never landed; drop the payload we just stored so
                // a retried insert starts clean.
                if let Err(del) = self.media.delete(&media_ref).await {
                    tracing::warn!(media_ref = %media_ref, error = %del, "Failed to clean up payload after aborted insert");
                }
                return Err(e.into());
            }
        };

        self.apply_order_change(&change);
        self.events.emit(CarouselEvent::Gallery(GalleryEvent::ImageAdded {
            id: image.id.clone(),
        }));

        Ok(image)
    }

    /// Update an image's title/description and optionally replace its media.
    pub async fn update_item(
        &self,
        id: &str,
        title: Option<String>,
        description: Option<String>,
        media: Option<(Bytes, String)>,
    ) -> Result<GalleryImage> {
        let media_ref = match media {
            Some((data, content_type)) => Some(self.media.store(data, &content_type).await?),
            None => None,
        };

        let image = self
            .store
            .update(
                id,
                ImagePatch {
                    title,
                    description,
                    media_ref,
                },
            )
            .await?;

        self.events.emit(CarouselEvent::Gallery(GalleryEvent::ImageUpdated {
            id: image.id.clone(),
        }));

        Ok(image)
    }

    /// Remove an image; survivors are resequenced and the rotation pointer
    /// remapped.
    pub async fn remove_item(&self, id: &str) -> Result<Vec<GalleryImage>> {
        let change = self.store.remove(id).await?;

        self.apply_order_change(&change);
        self.events.emit(CarouselEvent::Gallery(GalleryEvent::ImageRemoved {
            id: id.to_string(),
        }));
        self.emit_order(&change);

        Ok(change.current)
    }

    /// Move an image to `target_position` and return the new ordering.
    pub async fn reorder_item(
        &self,
        id: &str,
        target_position: usize,
    ) -> Result<Vec<GalleryImage>> {
        let change = self.store.reorder(id, target_position).await?;

        self.apply_order_change(&change);
        self.emit_order(&change);

        Ok(change.current)
    }

    /// Start a drag-reorder gesture against the current committed ordering.
    pub async fn begin_reorder(&self, id: &str) -> Result<ReorderGesture> {
        let order = self.store.list().await?;
        Ok(ReorderGesture::begin(&order, id)?)
    }

    /// Finish a gesture. Commits at most one reorder; a release over the
    /// origin commits nothing and returns `None`.
    pub async fn commit_reorder(
        &self,
        gesture: ReorderGesture,
    ) -> Result<Option<Vec<GalleryImage>>> {
        match gesture.release() {
            None => Ok(None),
            Some((id, target)) => Ok(Some(self.reorder_item(&id, target).await?)),
        }
    }

    // ------------------------------------------------------------------
    // Rotation operations
    // ------------------------------------------------------------------

    /// Index of the current item, or `None` while the gallery is empty.
    pub fn current_index(&self) -> Option<usize> {
        self.rotation.lock().current_index()
    }

    /// The current item itself.
    pub async fn current_image(&self) -> Result<Option<GalleryImage>> {
        let index = match self.current_index() {
            Some(index) => index,
            None => return Ok(None),
        };
        let items = self.store.list().await?;
        Ok(items.into_iter().nth(index))
    }

    /// Stop automatic rotation. The pointer is untouched.
    pub fn pause(&self) {
        self.rotation.lock().pause();
        self.sync_ticker();
        self.events
            .emit(CarouselEvent::Rotation(RotationEvent::Paused));
    }

    /// Resume automatic rotation from the unchanged pointer.
    pub fn resume(&self) {
        self.rotation.lock().resume();
        self.sync_ticker();
        self.events
            .emit(CarouselEvent::Rotation(RotationEvent::Resumed));
    }

    /// Jump directly to `index`. Play state is unchanged.
    pub fn select(&self, index: usize) -> Result<()> {
        self.rotation.lock().select(index)?;
        self.events
            .emit(CarouselEvent::Rotation(RotationEvent::Selected { index }));
        Ok(())
    }

    /// Manually advance to the next item (wraps; works while paused).
    pub fn next(&self) -> Option<usize> {
        let index = self.rotation.lock().next();
        if let Some(index) = index {
            self.events
                .emit(CarouselEvent::Rotation(RotationEvent::Advanced { index }));
        }
        index
    }

    /// Manually step back to the previous item (wraps; works while paused).
    pub fn previous(&self) -> Option<usize> {
        let index = self.rotation.lock().previous();
        if let Some(index) = index {
            self.events
                .emit(CarouselEvent::Rotation(RotationEvent::Advanced { index }));
        }
        index
    }

    /// Reconfigure the rotation interval. Restarts the timer.
    pub fn set_interval(&self, interval: Duration) -> Result<()> {
        let config = RotationConfig::new(interval);
        config.validate().map_err(CoreError::InvalidConfig)?;

        *self.config.lock() = config;
        self.sync_ticker();
        self.events
            .emit(CarouselEvent::Rotation(RotationEvent::IntervalChanged {
                interval_ms: interval.as_millis() as u64,
            }));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn apply_order_change(&self, change: &OrderChange) {
        self.rotation
            .lock()
            .on_order_changed(&change.previous, &change.current_ids());
        self.sync_ticker();
    }

    fn emit_order(&self, change: &OrderChange) {
        self.events
            .emit(CarouselEvent::Gallery(GalleryEvent::OrderChanged {
                order: change.current_ids(),
            }));
    }

    /// Reconcile the timer with the controller's state: running exactly when
    /// Playing with more than one item, at the configured interval. Always
    /// cancels before starting, so there is never more than one timer.
    fn sync_ticker(&self) {
        let wants_ticks = self.rotation.lock().wants_ticks();
        let mut ticker = self.ticker.lock();

        if !wants_ticks {
            ticker.stop();
            return;
        }

        let interval = self.config.lock().interval;
        let rotation = Arc::clone(&self.rotation);
        let events = self.events.clone();
        ticker.restart(interval, move || {
            if let Some(index) = rotation.lock().tick() {
                events.emit(CarouselEvent::Rotation(RotationEvent::Advanced { index }));
            }
        });
    }
}
