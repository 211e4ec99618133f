//! Parallel decoding of an export's fragment files into one room.
//!
//! The fragment list is split into contiguous ranges ([`partition`]), one per
//! scoped worker thread. A worker decodes its files in order into a private
//! buffer and touches the shared room exactly once, when it is done.
//!
//! ```text
//! files ──► partition ──► worker 0: f0 f1 f2 ──► buffer ─┐
//!                         worker 1: f3 f4    ──► buffer ─┼─► lock room, append
//!                         worker 2: f5 f6    ──► buffer ─┘
//! ```
//!
//! Message order inside a file is preserved. Order across files depends on
//! which worker merges first; use
//! [`MessageRoom::sort_chronological`](crate::MessageRoom::sort_chronological)
//! when a global order matters.

mod partition;

pub use partition::{available_parallelism, effective_workers, partition};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::thread;

use tracing::{debug, info, warn};

use crate::error::{Result, TgroomError};
use crate::message::{Message, MessageRoom};
use crate::parsing::{DecodedDocument, ExtractContext, decode};

/// Totals for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Fragment files decoded.
    pub files: usize,
    /// Worker threads used.
    pub workers: usize,
    /// Messages merged into the room.
    pub messages: usize,
}

#[derive(Debug, Default)]
struct WorkerOutput {
    room_name: Option<String>,
    buffer: Vec<Message>,
    files: usize,
}

/// Decodes `files` into `room` using up to `workers` threads.
///
/// `workers` is a hint, clamped by [`effective_workers`]. The configured zone
/// is checked once before any worker starts.
///
/// # Errors
///
/// A worker stops at its first file that cannot be read or decoded. Files it
/// finished before that are still merged; the failing file contributes
/// nothing. Other workers run to completion. The error of the earliest failing
/// range is returned, wrapped in [`TgroomError::File`] with the offending path.
/// In that case `room` holds every file that decoded completely.
///
/// What survives a failure depends on the worker count: the files after the
/// failing one in its range are never read. With one worker that is every
/// later file; with more, the later ranges still merge.
pub fn run(
    files: &[PathBuf],
    workers: Option<usize>,
    room: &mut MessageRoom,
    ctx: &ExtractContext<'_>,
) -> Result<RunSummary> {
    ctx.resolver.zone(ctx.time_zone)?;

    let workers = effective_workers(workers, files.len());
    let ranges = partition(files.len(), workers);
    info!(files = files.len(), workers, zone = ctx.time_zone, "starting extraction");

    let before = room.len();
    let shared = Mutex::new(room);
    let outcomes: Vec<Result<usize>> = thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .into_iter()
            .enumerate()
            .map(|(worker, range)| {
                let shared = &shared;
                let slice = &files[range];
                let ctx = *ctx;
                thread::Builder::new()
                    .name(format!("tgroom-worker-{worker}"))
                    .spawn_scoped(scope, move || run_worker(worker, slice, shared, &ctx))
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| match handle {
                Ok(handle) => handle
                    .join()
                    .unwrap_or_else(|_| Err(TgroomError::WorkerPanicked { worker })),
                Err(e) => Err(TgroomError::Io(e)),
            })
            .collect()
    });

    let mut summary = RunSummary {
        files: 0,
        workers,
        messages: 0,
    };
    let mut first_error = None;
    for outcome in outcomes {
        match outcome {
            Ok(files) => summary.files += files,
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    summary.messages = shared
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
        .len()
        .saturating_sub(before);

    if let Some(err) = first_error {
        return Err(err);
    }

    info!(
        files = summary.files,
        workers = summary.workers,
        messages = summary.messages,
        "extraction finished"
    );
    Ok(summary)
}

/// Decodes one range and merges it. Returns the number of files decoded.
fn run_worker(
    worker: usize,
    files: &[PathBuf],
    room: &Mutex<&mut MessageRoom>,
    ctx: &ExtractContext<'_>,
) -> Result<usize> {
    let mut output = WorkerOutput::default();
    let mut failure = None;

    for path in files {
        match decode_file(path, ctx) {
            Ok(mut doc) => {
                debug!(worker, path = %path.display(), messages = doc.messages.len(), "decoded fragment");
                if output.room_name.is_none() {
                    output.room_name = doc.room_name;
                }
                output.buffer.append(&mut doc.messages);
                output.files += 1;
            }
            Err(err) => {
                warn!(worker, path = %path.display(), error = %err, "fragment failed, stopping worker");
                failure = Some(err);
                break;
            }
        }
    }

    let files_done = output.files;
    merge(worker, room, output);

    match failure {
        Some(err) => Err(err),
        None => Ok(files_done),
    }
}

/// The single critical section of a worker.
fn merge(worker: usize, room: &Mutex<&mut MessageRoom>, mut output: WorkerOutput) {
    let merged = output.buffer.len();
    let mut room = room.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(name) = output.room_name.as_deref() {
        room.set_room_name_if_empty(name);
    }
    room.append(&mut output.buffer);
    drop(room);

    info!(worker, files = output.files, messages = merged, "merged worker buffer");
}

/// Reads and decodes one fragment. Errors carry the file path.
///
/// Invalid UTF-8 is replaced rather than rejected; the markup around it is
/// still usable.
pub fn decode_file(path: &Path, ctx: &ExtractContext<'_>) -> Result<DecodedDocument> {
    let bytes = fs::read(path).map_err(|e| TgroomError::in_file(path, e.into()))?;
    let html = String::from_utf8_lossy(&bytes);
    decode(&html, ctx).map_err(|e| TgroomError::in_file(path, e))
}
