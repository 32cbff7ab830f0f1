// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The row worker pool and its dispatcher.
//!
//! A fixed number of workers is spawned once, inside a crossbeam
//! scope, and each waits on a shared channel.  The dispatcher walks
//! the rows of the buffer in order and sends each one down the
//! channel along with its index.  Whoever receives a row owns it
//! until it is done with it: the rows come from `chunks_mut`, so no
//! two of them overlap and the buffer needs no lock.  When the rows
//! run out the dispatcher drops its end of the channel, the workers
//! drain what is left and exit, and the scope joins them.

use crossbeam::channel;
use crossbeam::thread::ScopedJoinHandle;
use log::debug;
use std::panic;

use crate::progress::Progress;

/// Hands every row in `rows` to exactly one of `threads` workers,
/// which call `work(index, row)` on it.  `queue_depth` is the capacity
/// of the row channel; at zero every send waits for a worker to take
/// the row.  `progress` hears about each row as it is sent.
///
/// Returns the number of rows each worker processed.  A zero thread
/// count is treated as one, and a queue deeper than the number of
/// rows is cut down to it, since it could never fill.  A panic in a
/// worker resumes on the calling thread once the scope has joined.
pub fn dispatch<'a, T, I, W>(
    rows: I,
    threads: usize,
    queue_depth: usize,
    progress: &mut dyn Progress,
    work: W,
) -> Vec<usize>
where
    T: Send + 'a,
    I: ExactSizeIterator<Item = &'a mut [T]>,
    W: Fn(usize, &mut [T]) + Sync,
{
    let threads = threads.max(1);
    let total = rows.len();
    let queue_depth = queue_depth.min(total);
    let work = &work;
    let (sender, receiver) = channel::bounded::<(usize, &'a mut [T])>(queue_depth);

    crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<usize>> = (0..threads)
            .map(|id| {
                let receiver = receiver.clone();
                spawner.spawn(move |_| {
                    let mut done = 0;
                    for (y, row) in receiver.iter() {
                        work(y, row);
                        done += 1;
                    }
                    debug!("worker {} exiting after {} rows", id, done);
                    done
                })
            })
            .collect();
        drop(receiver);

        for (y, row) in rows.enumerate() {
            // Only fails if every worker has died; the join below
            // reports why.
            if sender.send((y, row)).is_err() {
                break;
            }
            progress.dispatched(y, total);
        }
        drop(sender);
        progress.finish();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    })
    .unwrap_or_else(|e| panic::resume_unwind(e))
}
