mod ledger;
mod reports;
mod system;

use crate::cli::error::CommandError;
use crate::cli::registry::CommandRegistry;

pub use ledger::starter_configuration;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in ledger::definitions()
        .into_iter()
        .chain(reports::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}

fn usage(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}
