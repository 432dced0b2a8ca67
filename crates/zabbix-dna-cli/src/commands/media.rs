//! Media type commands.

use zabbix_dna_core::protocol::labels::{enabled_name, media_type_name};
use zabbix_dna_core::protocol::records::MediaType;
use zabbix_dna_core::protocol::Params;

use crate::cli::{MediaArgs, MediaCommands};
use crate::context::Context;
use crate::error::CliError;
use crate::output::Listing;

/// Run media command
pub async fn run_media(args: MediaArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        MediaCommands::TypeList => {
            let types: Vec<MediaType> = client.get("mediatype.get", Params::mediatype_list()).await?;
            ctx.emit(&Listing::new("media types", &["ID", "Name", "Type", "Status"], &types, |m| {
                vec![
                    m.mediatypeid.clone(),
                    m.name.clone(),
                    media_type_name(&m.kind).to_string(),
                    enabled_name(&m.status).to_string(),
                ]
            }));
            Ok(())
        }
    }
}
