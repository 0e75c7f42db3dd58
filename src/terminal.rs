use crate::{
    Error, Result,
    form::{QueryForm, view},
};
use std::{
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    task::JoinSet,
};
use tracing::warn;

/// Shown instead of submitting when the input is empty.
pub const REQUIRED_NOTICE: &str = "Please fill out this field.";

/// Submits a single question and writes the settled form.
///
/// An empty question is returned as `Error::EmptyInput` without writing
/// anything.
pub async fn run_once<W>(form: &QueryForm, question: String, out: &Arc<Mutex<W>>) -> Result<()>
where
    W: Write + Send,
{
    form.on_input_change(question);
    form.on_submit().await?;
    emit(out, &view::render(&form.snapshot()))
}

/// Treats every input line as typing the whole line and pressing submit.
///
/// Lines go to the form as read, minus the line terminator. Each submission
/// runs in its own task and the form is written again whenever one settles.
/// Returns once the input is exhausted and every submission has settled.
pub async fn run_interactive<R, W>(form: &QueryForm, input: R, out: Arc<Mutex<W>>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send + 'static,
{
    emit(&out, &view::render(&form.snapshot()))?;

    let mut lines = input.lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        form.on_input_change(line);

        match form.begin_submit() {
            Ok(pending) => {
                emit(&out, &view::render(&form.snapshot()))?;
                let form = form.clone();
                let out = Arc::clone(&out);
                in_flight.spawn(async move {
                    pending.await;
                    if let Err(e) = emit(&out, &view::render(&form.snapshot())) {
                        warn!("Failed to write answer: {}", e);
                    }
                });
            }
            Err(Error::EmptyInput) => emit(&out, &format!("{}\n", REQUIRED_NOTICE))?,
            Err(e) => return Err(e),
        }

        // Reap finished submissions so the set does not grow unbounded.
        while let Some(done) = in_flight.try_join_next() {
            if let Err(e) = done {
                warn!("Submission task failed: {}", e);
            }
        }
    }

    while let Some(done) = in_flight.join_next().await {
        if let Err(e) = done {
            warn!("Submission task failed: {}", e);
        }
    }

    Ok(())
}

fn emit<W: Write>(out: &Mutex<W>, text: &str) -> Result<()> {
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
