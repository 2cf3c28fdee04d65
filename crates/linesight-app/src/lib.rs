pub mod theme;
pub mod toast;

pub use theme::{ColorMode, NamedColor, ResolvedColors, SemanticColor, ThemeState};
pub use toast::{DEFAULT_TOAST_DURATION, Toast, ToastKind, ToastStore};

/// All UI-adjacent state in one place, never mixed with domain data.
///
/// Constructed once at startup and passed explicitly; nothing in here is a
/// process-wide singleton.
#[derive(Debug, Default)]
pub struct AppState {
    pub toasts: ToastStore,
    pub theme: ThemeState,
}

impl AppState {
    pub fn new(theme: ThemeState) -> Self {
        Self {
            toasts: ToastStore::new(),
            theme,
        }
    }
}
