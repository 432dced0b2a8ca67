//! User and user group commands.

use serde_json::Value;
use zabbix_dna_core::api::{resolve_id, Lookup};
use zabbix_dna_core::protocol::records::{Media, User, UserGroup};
use zabbix_dna_core::protocol::response::first_id;
use zabbix_dna_core::protocol::Params;

use crate::cli::{UserArgs, UserCommands, UsergroupArgs, UsergroupCommands};
use crate::context::Context;
use crate::error::{ApiError, CliError};
use crate::output::Listing;

/// Run user command
pub async fn run_user(args: UserArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        UserCommands::List => {
            let users: Vec<User> = client.get("user.get", Params::user_list()).await?;
            ctx.emit(&Listing::new(
                "users",
                &["ID", "Username", "Name", "Surname", "Role", "Groups"],
                &users,
                |u| {
                    vec![
                        u.userid.clone(),
                        u.username.clone(),
                        u.name.clone(),
                        u.surname.clone(),
                        u.roleid.clone(),
                        group_names(u),
                    ]
                },
            ));
            Ok(())
        }
        UserCommands::Show(args) => {
            let users: Vec<User> = client.get("user.get", Params::user_show(&args.name)).await?;
            let user = users.into_iter().next().ok_or_else(|| ApiError::NotFound {
                kind: "user",
                name: args.name.clone(),
            })?;

            let media: Vec<String> = user.medias.iter().map(media_label).collect();
            ctx.emit(&Listing::details(
                "user",
                &user,
                vec![
                    ("ID", user.userid.clone()),
                    ("Username", user.username.clone()),
                    ("Name", user.name.clone()),
                    ("Surname", user.surname.clone()),
                    ("Role", user.roleid.clone()),
                    ("Groups", group_names(&user)),
                    ("Media", media.join("\n")),
                ],
            ));
            Ok(())
        }
        UserCommands::Create(args) => {
            let result = client
                .call(
                    "user.create",
                    Params::user_create(&args.username, &args.password, &args.roleid, &args.groupid),
                )
                .await?;
            let userid = first_id(&result, "userids")?;
            ctx.report(&format!("User '{}' created (userid {})", args.username, userid), &result);
            Ok(())
        }
        UserCommands::Delete(args) => {
            let userid = resolve_id(&client, Lookup::User, &args.name).await?;
            let result = client.call("user.delete", Params::ids(&[userid])).await?;
            ctx.report(&format!("User '{}' deleted", args.name), &result);
            Ok(())
        }
    }
}

fn group_names(user: &User) -> String {
    user.usrgrps
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `sendto` is a string for most media and a list for email.
fn media_label(media: &Media) -> String {
    let sendto = match &media.sendto {
        Value::String(s) => s.clone(),
        Value::Array(values) => values
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    format!("{}: {}", media.mediatypeid, sendto)
}

/// Run usergroup command
pub async fn run_usergroup(args: UsergroupArgs, ctx: &Context) -> Result<(), CliError> {
    let client = ctx.connect().await?;

    match args.command {
        UsergroupCommands::List => {
            let groups: Vec<UserGroup> = client.get("usergroup.get", Params::usergroup_list()).await?;
            ctx.emit(&Listing::new("user groups", &["ID", "Name", "Rights"], &groups, |g| {
                vec![g.usrgrpid.clone(), g.name.clone(), g.rights.len().to_string()]
            }));
            Ok(())
        }
        UsergroupCommands::Delete(args) => {
            let groupid = resolve_id(&client, Lookup::UserGroup, &args.name).await?;
            let result = client.call("usergroup.delete", Params::ids(&[groupid])).await?;
            ctx.report(&format!("User group '{}' deleted", args.name), &result);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_label() {
        let email = Media {
            mediatypeid: "1".to_string(),
            sendto: json!(["ops@example.com", "noc@example.com"]),
        };
        assert_eq!(media_label(&email), "1: ops@example.com, noc@example.com");

        let sms = Media {
            mediatypeid: "3".to_string(),
            sendto: json!("+100200300"),
        };
        assert_eq!(media_label(&sms), "3: +100200300");
    }
}
