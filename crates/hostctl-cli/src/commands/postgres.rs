//! `hostctl postgres-config` - raw Postgres overrides

use hostctl_core::OverrideOptions;

use super::Context;
use crate::cli::PostgresConfigAction;
use crate::error::Result;
use crate::output::{self, print_overrides};

pub async fn run(ctx: &Context, action: PostgresConfigAction) -> Result<()> {
    let recorded = ctx.recorded_project();
    let overrides = match action {
        PostgresConfigAction::Get => {
            ctx.with_engine(recorded.as_deref(), |engine| Ok(engine.get_postgres_overrides()?))
                .await?
        }
        PostgresConfigAction::Update {
            config,
            replace_existing_overrides,
            no_restart,
        } => {
            let options = OverrideOptions {
                replace_existing: replace_existing_overrides,
                no_restart,
            };
            ctx.with_engine(recorded.as_deref(), move |engine| {
                Ok(engine.update_postgres_overrides(&config, &options)?)
            })
            .await?
        }
        PostgresConfigAction::Delete { config, no_restart } => {
            ctx.with_engine(recorded.as_deref(), move |engine| {
                Ok(engine.delete_postgres_overrides(config.as_slice(), no_restart)?)
            })
            .await?
        }
    };

    output::emit(ctx.output, &overrides, print_overrides)
}
