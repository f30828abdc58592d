use crate::SdkResult;

/// Lifecycle hooks a plugin exposes to the host, wired up by `export_plugin!`.
///
/// The exported module constructs the instance once, on the first enable, and
/// re-invokes `on_enable` on every enable after that. Hosts may enable the
/// same plugin repeatedly; implementations must not assume a single call.
pub trait PluginLifecycle: Sized + Send {
    fn create() -> SdkResult<Self>;

    fn on_enable(&mut self) -> SdkResult<()> {
        Ok(())
    }

    fn on_disable(&mut self) -> SdkResult<()> {
        Ok(())
    }
}
