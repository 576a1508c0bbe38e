pub mod apps;
pub mod chrome;
pub mod clock;
pub mod components;
pub mod focus;
pub mod model;
pub mod reducer;
pub mod registry;
pub mod session;

pub use components::{use_session, DesktopShell, SessionContext, SessionProvider};
pub use model::*;
pub use reducer::{reduce_window, WindowAction, WindowEffect};
pub use registry::{Registry, RegistryError, ToggleOutcome};
pub use session::{SessionCoordinator, SignalHub, Subscription};
