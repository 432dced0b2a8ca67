//! User macro commands.

use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::records::UserMacro;
use zabbix_dna_core::protocol::Params;

use crate::cli::{MacroArgs, MacroCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Run macro command
pub async fn run_macro(args: MacroArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        MacroCommands::List(args) => {
            // Templates are hosts as far as usermacro.get is concerned
            let owner = match (&args.host, &args.template) {
                (Some(host), _) => Some(resolve_id(&client, Lookup::Host, host).await?),
                (None, Some(template)) => Some(resolve_id(&client, Lookup::Template, template).await?),
                (None, None) => None,
            };

            let macros: Vec<UserMacro> = client
                .get(
                    "usermacro.get",
                    Params::usermacro_list(owner.as_ref().map(std::slice::from_ref)),
                )
                .await?;

            let scope = if owner.is_some() { "host" } else { "global" };
            ctx.emit(&Listing::new(
                "macros",
                &["ID", "Macro", "Value", "Description", "Scope"],
                &macros,
                |m| {
                    let id = if m.hostmacroid.is_empty() {
                        &m.globalmacroid
                    } else {
                        &m.hostmacroid
                    };
                    vec![
                        id.clone(),
                        m.name.clone(),
                        m.value.clone(),
                        m.description.clone(),
                        scope.to_string(),
                    ]
                },
            ));
            Ok(())
        }
    }
}
