//! `hostctl network-restrictions`

use colored::Colorize;

use hostctl_api::NetworkRestrictionsResponse;

use super::Context;
use crate::cli::NetworkRestrictionsAction;
use crate::error::Result;
use crate::output;

pub async fn run(ctx: &Context, action: NetworkRestrictionsAction) -> Result<()> {
    let recorded = ctx.recorded_project();
    let response = match action {
        NetworkRestrictionsAction::Get => {
            ctx.with_engine(recorded.as_deref(), |engine| Ok(engine.get_network_restrictions()?))
                .await?
        }
        NetworkRestrictionsAction::Update { db_allow_cidr } => {
            ctx.with_engine(recorded.as_deref(), move |engine| {
                Ok(engine.update_network_restrictions(db_allow_cidr.as_slice())?)
            })
            .await?
        }
    };

    output::emit(ctx.output, &response, print_restrictions)
}

fn print_restrictions(response: &NetworkRestrictionsResponse) {
    print_cidrs("DB Allowed IPv4 CIDRs:", &response.config.db_allowed_cidrs);
    print_cidrs("DB Allowed IPv6 CIDRs:", &response.config.db_allowed_cidrs_v6);
    if let Some(status) = &response.status {
        println!("{} {}", "Restrictions applied:".bold(), status);
    }
}

fn print_cidrs(label: &str, cidrs: &[String]) {
    if cidrs.is_empty() {
        println!("{} {}", label.bold(), "none".dimmed());
    } else {
        println!("{} {}", label.bold(), cidrs.join(", "));
    }
}
