use crate::services::render;
use anyhow::Result;
use boxdraft::App;
use boxdraft::features::registration::{BoxView, RegistrationFlow};
use boxdraft::registry::Selection;
use boxdraft::storage::Storage;

/// Prints what an anonymous visitor sees: the event, the form and the boxes.
pub fn show(app: &App) {
    let state = app.registry.snapshot();
    render::event(&state);
    render::form(&state);
    render::boxes(&BoxView::build(&state, None));
}

/// Submits the form and optionally joins a box right away.
///
/// # Errors
/// Fails on missing required answers, or when the chosen box is full or unknown. A failed join
/// leaves the new player registered and unassigned.
pub async fn register(app: &App, answers: Vec<(String, String)>, join: Option<String>) -> Result<()> {
    let mut flow = app.registration();
    for (question_id, text) in answers {
        flow.answer(question_id, text);
    }

    let player = flow.submit().await?;
    println!("✅ Registered '{}' with id {}", player.name, player.id);

    match join {
        Some(box_id) => choose(&mut flow, &box_id).await,
        None => {
            render::boxes(&flow.boxes());
            Ok(())
        },
    }
}

/// # Errors
/// Fails for an unknown player, or when the box is full or unknown.
pub async fn join(app: &App, player_id: &str, box_id: &str) -> Result<()> {
    let mut flow = RegistrationFlow::resume(app.registry.clone(), player_id)?;
    choose(&mut flow, box_id).await
}

/// # Errors
/// Fails for an unknown player.
pub fn teammates(app: &App, player_id: &str) -> Result<()> {
    let flow = RegistrationFlow::resume(app.registry.clone(), player_id)?;
    let Some(own) = flow.boxes().into_iter().find(|b| b.is_mine) else {
        println!("ℹ️ Not in a box yet.");
        return Ok(());
    };

    match own.teammates {
        Some(mates) => {
            println!("{} ({} / {}):", own.name, own.occupancy, own.capacity);
            render::teammates(&mates);
        },
        None => println!("ℹ️ Team lists are hidden by the organizer."),
    }
    Ok(())
}

async fn choose(flow: &mut RegistrationFlow<Storage>, box_id: &str) -> Result<()> {
    let selection = flow.choose_box(box_id).await?;
    let name = flow
        .boxes()
        .into_iter()
        .find(|b| b.id == box_id)
        .map_or_else(|| box_id.to_owned(), |b| b.name);

    match selection {
        Selection::Joined { previous: Some(_) } => println!("✅ Switched to {name}"),
        Selection::Joined { previous: None } => println!("✅ Joined {name}"),
        Selection::AlreadyMember => println!("ℹ️ Already in {name}"),
        Selection::Rejected(rejection) => anyhow::bail!("Could not join {name}: {rejection:?}"),
    }

    if let Some(mates) = flow.teammates() {
        render::teammates(&mates);
    }
    Ok(())
}
