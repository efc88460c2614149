//! Line-based terminal driving the [`ListView`] and [`DetailView`].

use std::{future, io};

use service::{
    domain::User,
    infra::source,
    query,
    view::{DetailView, FetchState, ListView},
    Query, Service,
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt as _},
    sync::watch,
};
use tracerr::Traced;
use tracing as log;

use crate::{command, render, Command};

/// Mounted [`DetailView`] along with its state subscription.
type Details<Src> = (DetailView<Src>, watch::Receiver<FetchState<User>>);

/// Runs the terminal, reading [`Command`]s from the provided `input` and
/// writing rendered views into the provided `output`.
///
/// Returns once `:quit` is typed or the `input` is exhausted. Must be
/// awaited inside a [`LocalSet`].
///
/// # Errors
///
/// If reading the `input` or writing the `output` fails.
///
/// [`LocalSet`]: tokio::task::LocalSet
pub async fn run<Src, R, W>(
    service: Service<Src>,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    Service<Src>: Query<
            query::users::List,
            Ok = Vec<User>,
            Err = Traced<source::Error>,
        > + Query<
            query::user::ById,
            Ok = User,
            Err = Traced<source::Error>,
        > + Clone
        + 'static,
    R: AsyncBufRead + Unpin,
    W: io::Write,
{
    let mut list = ListView::new(service);
    let mut snapshots = list.subscribe();
    let mut details: Option<Details<Src>> = None;
    let mut lines = input.lines();

    list.load();
    writeln!(output, "{}", command::HELP)?;
    writeln!(output, "{}", render::list(&snapshots.borrow_and_update()))?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    log::debug!("input is exhausted");
                    break;
                };
                let command = match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => command,
                    Err(e) => {
                        writeln!(output, "{e}")?;
                        continue;
                    }
                };
                log::debug!("executing `{command:?}`");

                match (command, &mut details) {
                    (Command::Reload, Some((view, _))) => view.reload(),
                    (Command::Reload, None) => list.reload(),
                    (Command::Back, slot @ Some(_)) => {
                        *slot = None;
                        let snapshot = snapshots.borrow_and_update();
                        writeln!(output, "{}", render::list(&snapshot))?;
                    }
                    (Command::Back, None) => {
                        writeln!(output, "Already at the list.")?;
                    }
                    (_, Some(_)) => {
                        writeln!(output, "Type `:back` to return to the list.")?;
                    }
                    (Command::Search(text), None) => list.on_query_change(text),
                    (Command::Page(n), None) => {
                        if !list.on_page_request(n) {
                            writeln!(output, "There is no page {n}.")?;
                        }
                    }
                    (Command::Next, None) => {
                        let next = list.snapshot().page.get() + 1;
                        if !list.on_page_request(next) {
                            writeln!(output, "Already at the last page.")?;
                        }
                    }
                    (Command::Previous, None) => {
                        let previous = list.snapshot().page.get() - 1;
                        if !list.on_page_request(previous) {
                            writeln!(output, "Already at the first page.")?;
                        }
                    }
                    (Command::Open(id), slot @ None) => {
                        let view = list.on_navigate_to_detail(id);
                        let state = view.subscribe();
                        writeln!(output, "{}", render::detail(&view.state()))?;
                        *slot = Some((view, state));
                    }
                    (Command::Quit, None) => break,
                }
            }
            () = list.step() => {}
            () = step(details.as_mut().map(|(view, _)| view)) => {}
        }

        if let Some((_, state)) = &mut details {
            if state.has_changed().unwrap_or_default() {
                let state = state.borrow_and_update();
                writeln!(output, "{}", render::detail(&state))?;
            }
        } else if snapshots.has_changed().unwrap_or_default() {
            let rendered = render::list(&snapshots.borrow_and_update());
            if !rendered.is_empty() {
                writeln!(output, "{rendered}")?;
            }
        }
    }

    Ok(())
}

/// Steps the provided [`DetailView`], if any.
async fn step<Src>(view: Option<&mut DetailView<Src>>) {
    match view {
        Some(view) => view.step().await,
        None => future::pending().await,
    }
}
