//! `hostctl ssl-enforcement`

use hostctl_api::SslEnforcementResponse;
use hostctl_core::ssl_status_message;

use super::Context;
use crate::cli::SslEnforcementAction;
use crate::error::Result;
use crate::output;

pub async fn run(ctx: &Context, action: SslEnforcementAction) -> Result<()> {
    let recorded = ctx.recorded_project();
    let response = match action {
        SslEnforcementAction::Get => {
            ctx.with_engine(recorded.as_deref(), |engine| Ok(engine.get_ssl_enforcement()?))
                .await?
        }
        SslEnforcementAction::Update {
            enable_db_ssl_enforcement,
            ..
        } => {
            ctx.with_engine(recorded.as_deref(), move |engine| {
                Ok(engine.update_ssl_enforcement(enable_db_ssl_enforcement)?)
            })
            .await?
        }
    };

    output::emit(ctx.output, &response, |response: &SslEnforcementResponse| {
        println!("{}", ssl_status_message(response));
    })
}
