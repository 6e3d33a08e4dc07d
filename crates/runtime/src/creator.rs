use async_trait::async_trait;
use mlo::TabSpec;

use crate::error::Result;

/// Something allowed to create browser tabs.
///
/// Implementations must honor [`TabSpec::active`]: planned tabs are always
/// background tabs and must not steal focus.
#[async_trait]
pub trait TabCreator: Send + Sync {
	async fn create_tab(&self, tab: &TabSpec) -> Result<()>;
}
