//! Template and template group commands.

use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::records::{Template, TemplateGroup};
use zabbix_dna_core::protocol::response::first_id;
use zabbix_dna_core::protocol::Params;

use crate::cli::{TemplateArgs, TemplateCommands, TemplategroupArgs, TemplategroupCommands};
use crate::context::Context;
use crate::error::{ApiError, CliError};
use crate::output::Listing;

/// Run template command
pub async fn run_template(args: TemplateArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        TemplateCommands::List(args) => {
            let templates: Vec<Template> = client
                .get("template.get", Params::template_list(args.limit))
                .await?;
            ctx.emit(&Listing::new(
                "templates",
                &["ID", "Template", "Name", "Items"],
                &templates,
                |t| vec![t.templateid.clone(), t.host.clone(), t.name.clone(), t.item_count()],
            ));
            Ok(())
        }
        TemplateCommands::Show(args) => {
            let templates: Vec<Template> = client
                .get("template.get", Params::template_show(&args.name))
                .await?;
            let template = templates.into_iter().next().ok_or_else(|| ApiError::NotFound {
                kind: "template",
                name: args.name.clone(),
            })?;

            let groups: Vec<&str> = template.groups.iter().map(|g| g.name.as_str()).collect();
            ctx.emit(&Listing::details(
                "template",
                &template,
                vec![
                    ("ID", template.templateid.clone()),
                    ("Template", template.host.clone()),
                    ("Name", template.name.clone()),
                    ("Groups", groups.join(", ")),
                    ("Items", template.item_count()),
                ],
            ));
            Ok(())
        }
        TemplateCommands::Delete(args) => {
            let templateid = resolve_id(&client, Lookup::Template, &args.name).await?;
            let result = client.call("template.delete", Params::ids(&[templateid])).await?;
            ctx.report(&format!("Template '{}' deleted", args.name), &result);
            Ok(())
        }
    }
}

/// Run templategroup command
pub async fn run_templategroup(args: TemplategroupArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        TemplategroupCommands::List => {
            let groups: Vec<TemplateGroup> = client
                .get("templategroup.get", Params::templategroup_list())
                .await?;
            ctx.emit(&Listing::new("template groups", &["ID", "Name"], &groups, |g| {
                vec![g.groupid.clone(), g.name.clone()]
            }));
            Ok(())
        }
        TemplategroupCommands::Create(args) => {
            let result = client
                .call("templategroup.create", Params::name_only(&args.name))
                .await?;
            let groupid = first_id(&result, "groupids")?;
            ctx.report(
                &format!("Template group '{}' created (groupid {})", args.name, groupid),
                &result,
            );
            Ok(())
        }
        TemplategroupCommands::Delete(args) => {
            let groupid = resolve_id(&client, Lookup::TemplateGroup, &args.name).await?;
            let result = client.call("templategroup.delete", Params::ids(&[groupid])).await?;
            ctx.report(&format!("Template group '{}' deleted", args.name), &result);
            Ok(())
        }
    }
}
