//! Controller lifecycle.
//!
//! `ControllerLifecycle` replaces a process-wide singleton: the composition
//! root owns one lifecycle, and the lifecycle owns at most one live
//! [`VibrationController`]. Handing out `&mut` borrows keeps that controller
//! exclusive without global state.

use core::fmt;

use tactile_backend::BackendProvider;
use tracing::{debug, info, warn};

use crate::config::{ConfigResult, ControllerConfig};
use crate::controller::VibrationController;
use crate::error::{ControllerError, ControllerResult};
use crate::state::{HandleState, LifecycleState};

/// Lazily acquires and caches the vibration controller.
///
/// # Example
///
/// ```rust
/// use tactile_backend::BackendSelection;
/// use tactile_controller::{ControllerConfig, ControllerLifecycle};
///
/// let config = ControllerConfig::builder()
///     .backend(BackendSelection::Unsupported)
///     .build()?;
/// let mut lifecycle = ControllerLifecycle::from_config(config)?;
///
/// // No vibration service is a normal outcome, not an error.
/// assert!(lifecycle.acquire().is_none());
/// assert!(!lifecycle.is_available());
/// # Ok::<(), tactile_controller::ConfigError>(())
/// ```
pub struct ControllerLifecycle {
    provider: Box<dyn BackendProvider>,
    config: ControllerConfig,
    controller: Option<VibrationController>,
    state: LifecycleState,
    unavailable_reason: Option<String>,
}

impl ControllerLifecycle {
    /// Create a lifecycle that acquires from `provider`.
    #[must_use]
    pub fn new(provider: Box<dyn BackendProvider>, config: ControllerConfig) -> Self {
        Self {
            provider,
            config,
            controller: None,
            state: LifecycleState::Idle,
            unavailable_reason: None,
        }
    }

    /// Validate `config` and build a lifecycle for its backend selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: ControllerConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config.provider(), config))
    }

    /// Get the controller, acquiring it on the first call.
    ///
    /// Returns `None` when the platform offers no usable vibration service.
    /// That outcome is cached: later calls return `None` without asking the
    /// provider again. After [`release`](Self::release) this always returns
    /// `None`.
    pub fn acquire(&mut self) -> Option<&mut VibrationController> {
        self.refresh();
        self.controller.as_mut()
    }

    /// Like [`acquire`](Self::acquire), with the reason for an absent controller.
    ///
    /// # Errors
    ///
    /// - [`ControllerError::UnsupportedPlatform`] when no vibration service is available
    /// - [`ControllerError::DisposedHandleUsed`] after the controller was released
    pub fn try_acquire(&mut self) -> ControllerResult<&mut VibrationController> {
        self.refresh();
        let absent = match self.state {
            LifecycleState::Released => ControllerError::disposed(HandleState::Disposed),
            _ => ControllerError::unsupported_platform(
                self.unavailable_reason
                    .clone()
                    .unwrap_or_else(|| "no vibration service".to_string()),
            ),
        };
        self.controller.as_mut().ok_or(absent)
    }

    /// Dispose the controller if one is live. No acquisition happens afterwards.
    pub fn release(&mut self) {
        if let Some(mut controller) = self.controller.take() {
            controller.dispose();
            info!(provider = self.provider.name(), "Vibration controller released");
        } else {
            debug!(state = %self.state, "Release with no live vibration controller");
        }
        self.state = LifecycleState::Released;
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// State of the controller handle, `Uninitialized` before acquisition.
    #[must_use]
    pub fn handle_state(&self) -> HandleState {
        match (&self.controller, self.state) {
            (Some(controller), _) => controller.state(),
            (None, LifecycleState::Idle | LifecycleState::Unavailable) => {
                HandleState::Uninitialized
            }
            (None, LifecycleState::Active | LifecycleState::Released) => HandleState::Disposed,
        }
    }

    /// True while a live controller is cached.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.state == LifecycleState::Active
    }

    /// Why acquisition produced no controller, if it did not.
    #[must_use]
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.unavailable_reason.as_deref()
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Bring the cached state up to date before handing out the controller.
    fn refresh(&mut self) {
        match self.state {
            LifecycleState::Idle => self.initialize(),
            LifecycleState::Active => {
                // Disposed through the handle itself.
                if self
                    .controller
                    .as_ref()
                    .is_some_and(|controller| !controller.is_active())
                {
                    self.controller = None;
                    self.state = LifecycleState::Released;
                    debug!("Vibration controller was disposed by its owner");
                }
            }
            LifecycleState::Unavailable | LifecycleState::Released => {}
        }
    }

    fn initialize(&mut self) {
        let backend = match self.provider.acquire() {
            Ok(backend) => backend,
            Err(error) => {
                warn!(
                    provider = self.provider.name(),
                    %error,
                    "No vibration service available"
                );
                self.mark_unavailable(error.to_string());
                return;
            }
        };

        let mut controller = VibrationController::with_config(backend, &self.config);
        if self.config.require_vibrator && !matches!(controller.has_vibrator(), Ok(true)) {
            controller.dispose();
            warn!(
                provider = self.provider.name(),
                "Vibration service reports no vibrator"
            );
            self.mark_unavailable("device has no vibrator".to_string());
            return;
        }

        info!(
            provider = self.provider.name(),
            backend = controller.backend_name(),
            "Vibration controller acquired"
        );
        self.controller = Some(controller);
        self.state = LifecycleState::Active;
    }

    fn mark_unavailable(&mut self, reason: String) {
        self.unavailable_reason = Some(reason);
        self.state = LifecycleState::Unavailable;
    }
}

impl fmt::Debug for ControllerLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerLifecycle")
            .field("provider", &self.provider.name())
            .field("state", &self.state)
            .field("controller", &self.controller)
            .field("unavailable_reason", &self.unavailable_reason)
            .finish_non_exhaustive()
    }
}
