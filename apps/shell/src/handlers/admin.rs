use crate::models::args::AdminAction;
use crate::services::render;
use anyhow::{Context, Result};
use boxdraft::App;
use boxdraft::features::admin::{AdminSession, BoxDraft, DropTarget, QuestionDraft, SettingsDraft};
use boxdraft::storage::Storage;
use tracing::warn;

/// Logs in and runs one admin action.
///
/// # Errors
/// Fails on a wrong password, on unknown ids and on invalid form input.
pub async fn handle_admin_command(app: &App, password: &str, action: AdminAction) -> Result<()> {
    let session = app.admin.login(password)?;

    match action {
        AdminAction::Dashboard {} => render::dashboard(&session.dashboard()),
        AdminAction::Move { player, box_id } => {
            session.drop_player(&player, DropTarget::Box(box_id.clone())).await?;
            warn_if_over_capacity(&session, &box_id);
            println!("✅ Moved {player} to {box_id}");
        },
        AdminAction::Unassign { player } => {
            session.drop_player(&player, DropTarget::Unassigned).await?;
            println!("✅ {player} is unassigned");
        },
        AdminAction::DeletePlayer { player } => {
            session.delete_player(&player).await?;
            println!("✅ Deleted player {player}");
        },
        AdminAction::AddQuestion { label, description, kind, optional } => {
            let draft = QuestionDraft::new(label)
                .description(description)
                .kind(kind.into())
                .required(!optional);
            let question = session.save_question(draft).await?;
            println!("✅ Added question '{}' as {}", question.label, question.id);
        },
        AdminAction::EditQuestion { id, label, description, kind, required } => {
            let mut draft = app
                .registry
                .snapshot()
                .question(&id)
                .map(QuestionDraft::edit)
                .with_context(|| format!("Unknown question: {id}"))?;
            if let Some(label) = label {
                draft.label = label;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(kind) = kind {
                draft.kind = kind.into();
            }
            if let Some(required) = required {
                draft.required = required;
            }

            let question = session.save_question(draft).await?;
            println!("✅ Saved question '{}'", question.label);
        },
        AdminAction::DeleteQuestion { id } => {
            session.delete_question(&id).await?;
            println!("✅ Deleted question {id}. Answers already given are kept.");
        },
        AdminAction::EditBox { id, name, capacity } => {
            let mut draft = app
                .registry
                .snapshot()
                .box_by_id(&id)
                .map(BoxDraft::edit)
                .with_context(|| format!("Unknown box: {id}"))?;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(capacity) = capacity {
                draft.capacity = capacity;
            }

            let saved = session.save_box(draft).await?;
            warn_if_over_capacity(&session, &saved.id);
            println!("✅ Saved {} ({} places)", saved.name, saved.capacity);
        },
        AdminAction::Settings { title, description, banner_url, banner_position, show_teammates } => {
            let mut draft = SettingsDraft::edit(&app.registry.snapshot().settings);
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(url) = banner_url {
                draft.banner_url = url;
            }
            if let Some(position) = banner_position {
                draft.banner_position = position;
            }
            if let Some(show) = show_teammates {
                draft.show_teammates = show;
            }

            let settings = session.save_settings(draft).await;
            println!("✅ Saved settings for '{}'", settings.event_title);
        },
        AdminAction::Banner { file, position } => {
            let data_url = session.encode_banner(&file).await?;
            let mut draft = SettingsDraft::edit(&app.registry.snapshot().settings);
            draft.banner_url = data_url;
            if let Some(position) = position {
                draft.banner_position = position;
            }
            session.save_settings(draft).await;
            println!("✅ Banner set from {}", file.display());
        },
        AdminAction::Reset { yes } => {
            let pending = session.reset_players();
            if yes {
                let removed = pending.confirm().await;
                println!("✅ Removed {removed} players");
            } else {
                println!("ℹ️ This would delete {} players. Re-run with --yes to confirm.", pending.players());
                pending.cancel();
            }
        },
    }

    Ok(())
}

fn warn_if_over_capacity(session: &AdminSession<Storage>, box_id: &str) {
    let dashboard = session.dashboard();
    if let Some(column) = dashboard.columns.iter().find(|c| c.id == box_id)
        && column.players.len() > column.capacity as usize
    {
        warn!(box_id, occupants = column.players.len(), capacity = column.capacity, "Box is over capacity");
        println!("⚠️ {} is over capacity: {}", column.name, column.badge());
    }
}
