//! Test-fixture plugin: every enable schedules one deferred task that asks
//! the host to shut down. Exists to prove a plugin builds, packages, and
//! loads against the platform API; it has no other behavior.

use lodestone_plugin_sdk::{PluginLifecycle, SdkResult, request_shutdown, schedule_task};

pub struct ShutdownProbe;

impl PluginLifecycle for ShutdownProbe {
    fn create() -> SdkResult<Self> {
        Ok(Self)
    }

    fn on_enable(&mut self) -> SdkResult<()> {
        schedule_task(|| {
            request_shutdown();
        })
    }
}

lodestone_plugin_sdk::export_plugin! {
    id: "dev.lodestone.test.shutdown",
    name: "Shutdown Probe",
    version: (0, 1, 0),
    lifecycle: ShutdownProbe,
}

#[cfg(test)]
mod tests;
