use std::io::{self, Write};

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;

use taskshare_lists::{audit_user, move_item, repair_user, resolve, ItemList};
use taskshare_store::{FileStore, ItemStore, ListStore};
use taskshare_types::{ExtendedItem, Item};

use crate::cli::*;
use crate::config::Config;

pub fn run_command(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let store = FileStore::from_config(&config.store)
        .with_context(|| format!("opening {}", config.store.data_path.display()))?;
    tracing::debug!(path = %store.path().display(), format = ?cli.format, "running command");
    let stdout = io::stdout();
    execute(&store, cli.command, cli.format, &mut stdout.lock())
}

pub fn execute<S: ListStore + ItemStore>(
    store: &S,
    command: Command,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Add(args) => cmd_add(store, args, format, out),
        Command::List(args) => cmd_list(store, args, format, out),
        Command::Remove(args) => cmd_remove(store, args, format, out),
        Command::Locate(args) => cmd_locate(store, args, format, out),
        Command::Move(args) => cmd_move(store, args, format, out),
        Command::Audit(args) => cmd_audit(store, args, format, out),
        Command::Repair(args) => cmd_repair(store, args, format, out),
    }
}

fn cmd_add<S: ListStore + ItemStore>(
    store: &S,
    args: AddArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    if args.list.is_shared() && args.foreign_user.is_empty() {
        bail!("the {} list needs --foreign-user", args.list);
    }
    if let Some(found) = resolve(store, &args.user, &args.item)? {
        bail!(
            "{} already holds {} in their {} list",
            args.user,
            args.item,
            found.kind
        );
    }
    if store.get_item(&args.item)?.is_none() {
        let message = args.message.unwrap_or_else(|| args.item.clone());
        store.put_item(&Item::new(args.item.clone(), message))?;
    }
    let list = ItemList::new(store, args.user.as_str(), args.list);
    list.add(&args.item, &args.foreign_item, &args.foreign_user)?;

    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "user": args.user, "item": args.item, "list": args.list })
        )?,
        OutputFormat::Text => writeln!(
            out,
            "{} Added {} to {}'s {} list",
            "✓".green().bold(),
            args.item.yellow(),
            args.user,
            args.list
        )?,
    }
    Ok(())
}

fn cmd_list<S: ListStore + ItemStore>(
    store: &S,
    args: ListArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let items = ItemList::new(store, args.user.as_str(), args.list).items()?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&items)?)?,
        OutputFormat::Text => {
            if items.is_empty() {
                writeln!(out, "{}'s {} list is empty.", args.user, args.list)?;
            }
            for (n, item) in items.iter().enumerate() {
                writeln!(out, "{:>3}. {}", n, describe(item))?;
            }
        }
    }
    Ok(())
}

fn describe(item: &ExtendedItem) -> String {
    let mut line = format!("{} {}", item.id().yellow(), item.item.message);
    if !item.foreign_user.is_empty() {
        let their_list = item
            .foreign_list
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "gone".into());
        line.push_str(&format!(" ({}: {})", item.foreign_user.cyan(), their_list.dimmed()));
    }
    line
}

fn cmd_remove<S: ListStore + ItemStore>(
    store: &S,
    args: RemoveArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let removed_from = match args.list {
        Some(kind) => ItemList::new(store, args.user.as_str(), kind)
            .remove(&args.item)?
            .then_some(kind),
        None => match resolve(store, &args.user, &args.item)? {
            Some(found) => found.list.remove(&args.item)?.then_some(found.kind),
            None => None,
        },
    };

    // Items are shared by id across users; drop one only once nothing points at it.
    let deleted = removed_from.is_some()
        && !store.is_referenced(&args.item)?
        && store.delete_item(&args.item)?;

    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({
                "user": args.user,
                "item": args.item,
                "removed_from": removed_from,
                "deleted": deleted,
            })
        )?,
        OutputFormat::Text => match removed_from {
            Some(kind) => writeln!(
                out,
                "{} Removed {} from {}'s {} list",
                "✓".green().bold(),
                args.item.yellow(),
                args.user,
                kind
            )?,
            None => writeln!(out, "{} is not in {}'s lists; nothing removed.", args.item, args.user)?,
        },
    }
    Ok(())
}

fn cmd_locate<S: ListStore + ItemStore>(
    store: &S,
    args: LocateArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let found = resolve(store, &args.user, &args.item)?;
    match format {
        OutputFormat::Json => {
            let value = match &found {
                Some(p) => json!({
                    "user": args.user,
                    "item": args.item,
                    "list": p.kind,
                    "position": p.position,
                    "element": p.element,
                }),
                None => json!({ "user": args.user, "item": args.item, "list": null }),
            };
            writeln!(out, "{value}")?;
        }
        OutputFormat::Text => match &found {
            Some(p) => {
                write!(
                    out,
                    "{} is in {}'s {} list at position {}",
                    args.item.yellow(),
                    args.user,
                    p.kind.to_string().bold(),
                    p.position
                )?;
                if p.element.has_counterpart() {
                    write!(
                        out,
                        " (counterpart {} of {})",
                        p.element.foreign_item_id, p.element.foreign_user_id
                    )?;
                }
                writeln!(out)?;
            }
            None => writeln!(out, "{} is not in any of {}'s lists", args.item, args.user)?,
        },
    }
    Ok(())
}

fn cmd_move<S: ListStore + ItemStore>(
    store: &S,
    args: MoveArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let Some(found) = resolve(store, &args.user, &args.item)? else {
        bail!("{} is not in any of {}'s lists", args.item, args.user);
    };
    let from = found.kind;
    let foreign_item = args
        .foreign_item
        .unwrap_or_else(|| found.element.foreign_item_id.clone());
    let foreign_user = args
        .foreign_user
        .unwrap_or_else(|| found.element.foreign_user_id.clone());
    let destination = ItemList::new(store, args.user.as_str(), args.to);
    move_item(&found.list, &destination, &args.item, &foreign_item, &foreign_user)?;

    match format {
        OutputFormat::Json => writeln!(
            out,
            "{}",
            json!({ "user": args.user, "item": args.item, "from": from, "to": args.to })
        )?,
        OutputFormat::Text => writeln!(
            out,
            "{} Moved {} from {} to {}",
            "✓".green().bold(),
            args.item.yellow(),
            from,
            args.to
        )?,
    }
    Ok(())
}

fn cmd_audit<S: ListStore + ItemStore>(
    store: &S,
    args: UserArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let report = audit_user(store, &args.user)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&report)?)?,
        OutputFormat::Text => {
            if report.is_consistent() {
                writeln!(out, "{} No issues.", "✓".green().bold())?;
            }
            for conflict in &report.conflicts {
                let kinds: Vec<String> = conflict.kinds.iter().map(|k| k.to_string()).collect();
                writeln!(
                    out,
                    "{} {} is in {} lists: {}",
                    "✗".red().bold(),
                    conflict.item_id.yellow(),
                    kinds.len(),
                    kinds.join(", ")
                )?;
            }
        }
    }
    Ok(())
}

fn cmd_repair<S: ListStore + ItemStore>(
    store: &S,
    args: UserArgs,
    format: OutputFormat,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let report = repair_user(store, &args.user)?;
    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&report)?)?,
        OutputFormat::Text => {
            for (item, kind) in &report.removed {
                writeln!(out, "  removed {} from {}", item.yellow(), kind)?;
            }
            writeln!(
                out,
                "{} Repair done: {} entries removed.",
                "✓".green(),
                report.removed.len()
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskshare_store::InMemoryStore;
    use taskshare_types::ListKind;

    fn run<S: ListStore + ItemStore>(store: &S, command: Command, format: OutputFormat) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        execute(store, command, format, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn add(user: &str, item: &str, list: ListKind) -> Command {
        let (foreign_item, foreign_user) = if list.is_shared() {
            (format!("{item}-copy"), "peer".to_string())
        } else {
            (String::new(), String::new())
        };
        Command::Add(AddArgs {
            user: user.into(),
            item: item.into(),
            message: Some(format!("do {item}")),
            list,
            foreign_item,
            foreign_user,
        })
    }

    #[test]
    fn add_then_locate() {
        let store = InMemoryStore::new();
        run(&store, add("alice", "task-1", ListKind::Mine), OutputFormat::Text);

        let text = run(
            &store,
            Command::Locate(LocateArgs {
                user: "alice".into(),
                item: "task-1".into(),
            }),
            OutputFormat::Text,
        );
        assert_eq!(text, "task-1 is in alice's mine list at position 0\n");

        let json: serde_json::Value = serde_json::from_str(&run(
            &store,
            Command::Locate(LocateArgs {
                user: "alice".into(),
                item: "task-404".into(),
            }),
            OutputFormat::Json,
        ))
        .unwrap();
        assert!(json["list"].is_null());
    }

    #[test]
    fn add_refuses_item_already_listed() {
        let store = InMemoryStore::new();
        run(&store, add("alice", "t", ListKind::Mine), OutputFormat::Text);
        let mut buf = Vec::new();
        let err = execute(&store, add("alice", "t", ListKind::Outgoing), OutputFormat::Text, &mut buf)
            .unwrap_err();
        assert!(err.to_string().contains("mine"));
    }

    #[test]
    fn add_to_shared_list_requires_counterpart() {
        let store = InMemoryStore::new();
        let mut buf = Vec::new();
        let err = execute(
            &store,
            Command::Add(AddArgs {
                user: "u".into(),
                item: "t".into(),
                message: None,
                list: ListKind::Incoming,
                foreign_item: String::new(),
                foreign_user: String::new(),
            }),
            OutputFormat::Text,
            &mut buf,
        )
        .unwrap_err();
        assert!(err.to_string().contains("--foreign-user"));
        assert_eq!(store.item_count().unwrap(), 0);
        assert!(resolve(&store, "u", "t").unwrap().is_none());
    }

    #[test]
    fn list_json_in_order() {
        let store = InMemoryStore::new();
        for id in ["a", "b", "c"] {
            run(&store, add("u", id, ListKind::Mine), OutputFormat::Text);
        }
        let text = run(
            &store,
            Command::List(ListArgs {
                user: "u".into(),
                list: ListKind::Mine,
            }),
            OutputFormat::Json,
        );
        let items: Vec<ExtendedItem> = serde_json::from_str(&text).unwrap();
        let ids: Vec<&str> = items.iter().map(ExtendedItem::id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn move_keeps_counterpart_by_default() {
        let store = InMemoryStore::new();
        run(
            &store,
            Command::Add(AddArgs {
                user: "bob".into(),
                item: "b1".into(),
                message: None,
                list: ListKind::Incoming,
                foreign_item: "a1".into(),
                foreign_user: "alice".into(),
            }),
            OutputFormat::Text,
        );
        run(
            &store,
            Command::Move(MoveArgs {
                user: "bob".into(),
                item: "b1".into(),
                to: ListKind::Mine,
                foreign_item: None,
                foreign_user: None,
            }),
            OutputFormat::Text,
        );
        let found = resolve(&store, "bob", "b1").unwrap().unwrap();
        assert_eq!(found.kind, ListKind::Mine);
        assert_eq!(found.element.foreign_user_id, "alice");
        assert_eq!(store.get_item("b1").unwrap().unwrap().message, "b1");
    }

    #[test]
    fn remove_without_list_uses_resolver() {
        let store = InMemoryStore::new();
        run(&store, add("u", "t", ListKind::Outgoing), OutputFormat::Text);
        let text = run(
            &store,
            Command::Remove(RemoveArgs {
                user: "u".into(),
                item: "t".into(),
                list: None,
            }),
            OutputFormat::Text,
        );
        assert!(text.contains("from u's outgoing list"));
        assert!(resolve(&store, "u", "t").unwrap().is_none());

        let again = run(
            &store,
            Command::Remove(RemoveArgs {
                user: "u".into(),
                item: "t".into(),
                list: None,
            }),
            OutputFormat::Text,
        );
        assert!(again.contains("nothing removed"));
    }

    #[test]
    fn remove_deletes_unreferenced_item() {
        let store = InMemoryStore::new();
        run(&store, add("u", "t", ListKind::Mine), OutputFormat::Text);
        assert_eq!(store.item_count().unwrap(), 1);

        let text = run(
            &store,
            Command::Remove(RemoveArgs {
                user: "u".into(),
                item: "t".into(),
                list: None,
            }),
            OutputFormat::Json,
        );
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["deleted"], true);
        assert_eq!(store.item_count().unwrap(), 0);
    }

    #[test]
    fn remove_keeps_item_still_listed_elsewhere() {
        let store = InMemoryStore::new();
        run(&store, add("alice", "t", ListKind::Mine), OutputFormat::Text);
        run(&store, add("bob", "t", ListKind::Mine), OutputFormat::Text);

        run(
            &store,
            Command::Remove(RemoveArgs {
                user: "alice".into(),
                item: "t".into(),
                list: Some(ListKind::Mine),
            }),
            OutputFormat::Text,
        );
        assert_eq!(store.item_count().unwrap(), 1);
        assert!(resolve(&store, "bob", "t").unwrap().is_some());

        run(
            &store,
            Command::Remove(RemoveArgs {
                user: "bob".into(),
                item: "t".into(),
                list: None,
            }),
            OutputFormat::Text,
        );
        assert_eq!(store.item_count().unwrap(), 0);
    }

    #[test]
    fn audit_and_repair() {
        let store = InMemoryStore::new();
        run(&store, add("u", "t", ListKind::Mine), OutputFormat::Text);
        ItemList::for_incoming(&store, "u").add("t", "s", "w").unwrap();

        let audit = run(&store, Command::Audit(UserArgs { user: "u".into() }), OutputFormat::Text);
        assert!(audit.contains("t is in 2 lists: mine, incoming"));

        let repair = run(&store, Command::Repair(UserArgs { user: "u".into() }), OutputFormat::Text);
        assert!(repair.contains("1 entries removed"));

        let audit = run(&store, Command::Audit(UserArgs { user: "u".into() }), OutputFormat::Text);
        assert!(audit.contains("No issues."));
    }
}
