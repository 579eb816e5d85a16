use std::io::{self, Write};

use anyhow::{bail, Context};
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use discog_records::Catalog;
use discog_server::CatalogServer;
use discog_types::{Album, AlbumFields, AlbumId};

use crate::cli::*;
use crate::settings::Settings;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(dir) = cli.data_dir {
        settings.store.data_dir = dir;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Album { action } => {
            let catalog = open_catalog(&settings)?;
            cmd_album(&catalog, action, cli.format, &mut out)
        }
        Command::User { action } => {
            let catalog = open_catalog(&settings)?;
            cmd_user(&catalog, action, cli.format, &mut out)
        }
        Command::Serve(args) => cmd_serve(settings, args),
    }
}

fn open_catalog(settings: &Settings) -> anyhow::Result<Catalog> {
    Catalog::open(&settings.store).with_context(|| {
        format!("opening catalog in {}", settings.store.data_dir.display())
    })
}

fn print_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn print_done(out: &mut impl Write, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{} {}", "✓".green().bold(), message)
}

fn album_tag(id: AlbumId) -> colored::ColoredString {
    format!("#{id}").yellow()
}

fn print_album(out: &mut impl Write, album: &Album) -> io::Result<()> {
    let date = if album.release_date.is_empty() {
        String::new()
    } else {
        format!(" ({})", album.release_date)
    };
    writeln!(out, "{} {}{}", album_tag(album.id), album.title.bold(), date)?;
    if !album.description.is_empty() {
        writeln!(out, "    {}", album.description.dimmed())?;
    }
    Ok(())
}

/// Fields for `album edit`: supplied flags replace, missing ones keep `current`.
pub fn merge_fields(current: AlbumFields, args: &EditArgs) -> AlbumFields {
    AlbumFields {
        title: args.title.clone().unwrap_or(current.title),
        description: args.description.clone().unwrap_or(current.description),
        release_date: args.release_date.clone().unwrap_or(current.release_date),
    }
}

pub fn cmd_album(
    catalog: &Catalog,
    action: AlbumAction,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let albums = catalog.albums();
    match action {
        AlbumAction::List => {
            let all = albums.list()?;
            match format {
                OutputFormat::Json => print_json(out, &all)?,
                OutputFormat::Text if all.is_empty() => writeln!(out, "No albums.")?,
                OutputFormat::Text => {
                    for album in &all {
                        print_album(out, album)?;
                    }
                }
            }
        }
        AlbumAction::Show { id } => {
            let Some(album) = albums.get(id)? else {
                bail!("album {id} not found");
            };
            match format {
                OutputFormat::Json => print_json(out, &album)?,
                OutputFormat::Text => print_album(out, &album)?,
            }
        }
        AlbumAction::Add(args) => {
            let fields = AlbumFields::new(args.title, args.description, args.release_date);
            let album = albums.add(fields)?;
            match format {
                OutputFormat::Json => print_json(out, &album)?,
                OutputFormat::Text => {
                    print_done(out, format_args!("Added album {}", album_tag(album.id)))?
                }
            }
        }
        AlbumAction::Edit(args) => {
            let Some(current) = albums.get(args.id)? else {
                bail!("album {} not found", args.id);
            };
            let fields = merge_fields(current.fields(), &args);
            let Some(album) = albums.update(args.id, fields)? else {
                bail!("album {} not found", args.id);
            };
            match format {
                OutputFormat::Json => print_json(out, &album)?,
                OutputFormat::Text => {
                    print_done(out, format_args!("Updated album {}", album_tag(album.id)))?
                }
            }
        }
        AlbumAction::Delete { id } => {
            let deleted = albums.delete(id)?;
            match format {
                OutputFormat::Json => print_json(out, &json!({ "id": id, "deleted": deleted }))?,
                OutputFormat::Text if deleted => {
                    print_done(out, format_args!("Deleted album {}", album_tag(id)))?
                }
                OutputFormat::Text => {
                    writeln!(out, "No album {}; nothing deleted.", album_tag(id))?
                }
            }
        }
    }
    Ok(())
}

pub fn cmd_user(
    catalog: &Catalog,
    action: UserAction,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let users = catalog.users();
    match action {
        UserAction::Register { username, password } => {
            if !users.register(&username, &password)? {
                bail!("user {username} already exists");
            }
            match format {
                OutputFormat::Json => {
                    print_json(out, &json!({ "username": username, "role": "user" }))?
                }
                OutputFormat::Text => {
                    print_done(out, format_args!("Registered {}", username.bold()))?
                }
            }
        }
        UserAction::Login { username, password } => {
            if !users.authenticate(&username, &password)? {
                bail!("invalid username or password");
            }
            let role = users
                .find(&username)?
                .map(|record| record.role)
                .context("authenticated user has no record")?;
            match format {
                OutputFormat::Json => {
                    print_json(out, &json!({ "username": username, "role": role }))?
                }
                OutputFormat::Text => print_done(
                    out,
                    format_args!(
                        "Logged in as {} ({})",
                        username.bold(),
                        role.to_string().cyan()
                    ),
                )?,
            }
        }
    }
    Ok(())
}

fn cmd_serve(settings: Settings, args: ServeArgs) -> anyhow::Result<()> {
    let mut config = settings.server.clone();
    if let Some(bind) = args.bind {
        config.bind_addr = bind
            .parse()
            .with_context(|| format!("invalid bind address {bind:?}"))?;
    }
    let catalog = open_catalog(&settings)?;
    println!(
        "Discog server on {} (data: {})",
        config.bind_addr.to_string().bold(),
        settings.store.data_dir.display()
    );

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(CatalogServer::new(config, catalog).serve())?;
    Ok(())
}
