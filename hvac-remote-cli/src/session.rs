use std::io::Write;

use eyre::{Result, WrapErr};
use hvac_remote_core::{Notice, RemoteCommand, RemoteController, RemoteProfile, RemoteState};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::TryRecvError;

use crate::render::Panel;

fn draw(profile: &RemoteProfile, state: &RemoteState) {
    println!("\n{}", Panel::new(profile, state));
}

fn toast(notice: &Notice) {
    println!("{} {}", notice.icon(), notice);
}

fn prompt() -> Result<()> {
    print!("> ");
    std::io::stdout().flush().wrap_err("Could not flush stdout")
}

fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

/// Reads commands from stdin until `quit` or end of input. The remote is redrawn from
/// its state channel, so only commands that changed something cause a redraw.
pub async fn interactive(mut remote: RemoteController) -> Result<()> {
    let mut states = remote.subscribe_state();
    let mut notices = remote.subscribe_notices();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    draw(remote.profile(), &remote.state());

    loop {
        prompt()?;
        let line = match lines
            .next_line()
            .await
            .wrap_err("Could not read command from stdin")?
        {
            Some(line) => line,
            None => {
                debug!("end of input");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_quit(line) {
            break;
        }

        match line.parse::<RemoteCommand>() {
            Ok(RemoteCommand::Status) => draw(remote.profile(), &remote.state()),
            Ok(command) => {
                if let Err(e) = remote.execute(command) {
                    println!("⚠️ {}", e);
                }
            }
            Err(e) => println!("⚠️ {}", e),
        }

        if states.has_changed().unwrap_or(false) {
            let state = *states.borrow_and_update();
            draw(remote.profile(), &state);
        }
        loop {
            match notices.try_recv() {
                Ok(notice) => toast(&notice),
                Err(TryRecvError::Lagged(skipped)) => warn!("skipped {} notices", skipped),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    println!();
    Ok(())
}

/// Runs a fixed list of commands, stopping at the first one the remote rejects.
pub fn scripted<S: AsRef<str>>(mut remote: RemoteController, commands: &[S]) -> Result<()> {
    for line in commands {
        let line = line.as_ref();
        let command = line
            .parse::<RemoteCommand>()
            .wrap_err_with(|| format!("Could not parse command {:?}", line))?;
        debug!("running {}", command);
        match remote.execute(command) {
            Ok(Some(notice)) => toast(&notice),
            Ok(None) => {}
            Err(e) => {
                draw(remote.profile(), &remote.state());
                return Err(e).wrap_err_with(|| format!("Command {:?} was rejected", line));
            }
        }
    }
    draw(remote.profile(), &remote.state());
    Ok(())
}
