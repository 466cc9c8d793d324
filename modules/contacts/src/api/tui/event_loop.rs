use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::api::tui::controller::ContactsController;
use crate::api::tui::keymap::map_key;
use crate::api::tui::view;

/// Take over the terminal and run the UI until the user quits.
///
/// Storage calls are awaited inline, one action at a time.
pub async fn run(mut controller: ContactsController) -> anyhow::Result<()> {
    info!("Starting contacts UI");
    let mut terminal = ratatui::init();
    let result = drive(&mut terminal, &mut controller).await;
    ratatui::restore();
    info!("Contacts UI stopped");
    result
}

async fn drive(
    terminal: &mut DefaultTerminal,
    controller: &mut ContactsController,
) -> anyhow::Result<()> {
    let mut events = EventStream::new();

    while !controller.should_quit() {
        terminal.draw(|frame| view::render(frame, controller))?;

        let Some(event) = events.next().await else {
            debug!("Terminal event stream closed");
            break;
        };
        if let Event::Key(key) = event? {
            if let Some(action) = map_key(key) {
                controller.dispatch(action).await;
            }
        }
    }
    Ok(())
}
