use crate::combine::decode::{self, TextEncoding};
use crate::combine::{paths, tree};
use crate::constants::{
    CONTENTS_TITLE, INDEX_TITLE, RULE_WIDTH, STATUS_COMBINING, STATUS_DONE, TIMESTAMP_FORMAT,
    TOC_TITLE, TREE_TITLE,
};
use crate::error::{CombineError, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver, Sender},
    thread::{self, JoinHandle},
};
use tracing::{debug, info, warn};

/// Everything one run needs: the root, the files in output order, the artifact path.
#[derive(Debug, Clone, Default)]
pub struct CombineJob {
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
}

impl CombineJob {
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(CombineError::Validation(
                "Please select a root directory.".into(),
            ));
        }
        if self.files.is_empty() {
            return Err(CombineError::Validation(
                "Please select files to combine.".into(),
            ));
        }
        if self.output.as_os_str().is_empty() {
            return Err(CombineError::Validation(
                "Please specify an output file.".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineSummary {
    pub files: usize,
    pub output: PathBuf,
    /// Files replaced by the read-error placeholder.
    pub unreadable: usize,
    /// Files decoded through the Latin-1 fallback.
    pub latin1: usize,
}

impl CombineSummary {
    pub fn message(&self) -> String {
        format!(
            "Successfully combined {} files to {}",
            self.files,
            self.output.display()
        )
    }
}

/// Messages sent from a running combination. `Done` is always the last one.
#[derive(Debug)]
pub enum CombineEvent {
    Progress(Progress),
    Done(Result<CombineSummary>),
}

/// Handle to a combination running on its own thread.
pub struct RunHandle {
    pub events: Receiver<CombineEvent>,
    /// `None` when the job was rejected before a worker started.
    thread: Option<JoinHandle<()>>,
}

impl RunHandle {
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Waits for the worker, if one was started.
    pub fn join(self) -> thread::Result<()> {
        match self.thread {
            Some(thread) => thread.join(),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CombinerEngine;

impl CombinerEngine {
    pub fn new() -> Self {
        Self
    }

    /// Writes the combined artifact for `job`, reporting progress before each file
    /// and once more at 100 when the artifact is complete.
    pub fn combine(
        &self,
        job: &CombineJob,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<CombineSummary> {
        job.validate()?;

        let file = File::create(&job.output).map_err(|e| CombineError::fs(&job.output, e))?;
        let mut out = BufWriter::new(file);
        let counts = write_artifact(job, &mut out, &mut on_progress)
            .and_then(|counts| out.flush().map(|_| counts))
            .map_err(|e| CombineError::fs(&job.output, e))?;

        on_progress(Progress {
            percent: 100,
            status: STATUS_DONE.to_string(),
        });
        let summary = CombineSummary {
            files: job.files.len(),
            output: job.output.clone(),
            unreadable: counts.unreadable,
            latin1: counts.latin1,
        };
        info!("{}", summary.message());
        Ok(summary)
    }

    /// Runs [`Self::combine`] and forwards every callback as a [`CombineEvent`].
    pub fn run(
        &self,
        job: &CombineJob,
        events: &Sender<CombineEvent>,
    ) {
        let result = self.combine(job, |p| {
            if events.send(CombineEvent::Progress(p)).is_err() {
                debug!("progress receiver dropped");
            }
        });
        if let Err(e) = &result {
            warn!("combination failed: {e}");
        }
        let _ = events.send(CombineEvent::Done(result));
    }

    /// Starts [`Self::run`] on a dedicated worker thread. A job failing
    /// validation gets its single `Done(Err)` before this returns, and no
    /// worker is started.
    pub fn spawn(
        self,
        job: CombineJob,
    ) -> io::Result<RunHandle> {
        let (tx, rx) = mpsc::channel();
        if let Err(e) = job.validate() {
            warn!("combination failed: {e}");
            let _ = tx.send(CombineEvent::Done(Err(e)));
            return Ok(RunHandle {
                events: rx,
                thread: None,
            });
        }
        let thread = thread::Builder::new()
            .name("combiner".into())
            .spawn(move || self.run(&job, &tx))?;
        Ok(RunHandle {
            events: rx,
            thread: Some(thread),
        })
    }
}

#[derive(Default)]
struct Counts {
    unreadable: usize,
    latin1: usize,
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

fn write_artifact<W: Write>(
    job: &CombineJob,
    out: &mut W,
    on_progress: &mut impl FnMut(Progress),
) -> io::Result<Counts> {
    let total = job.files.len();
    let heavy = rule('=');
    let light = rule('-');

    // Manifest header
    writeln!(out, "{heavy}\n{INDEX_TITLE}\n{heavy}")?;
    writeln!(out, "Created: {}", Local::now().format(TIMESTAMP_FORMAT))?;
    writeln!(out, "Root Directory: {}", job.root.display())?;
    writeln!(out, "Number of Files: {total}\n")?;

    // The root's own line is dropped; only its descendants are shown.
    writeln!(out, "{TREE_TITLE}\n{light}")?;
    for line in tree::render(&job.root).iter().skip(1) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;

    let relative: Vec<String> = job
        .files
        .iter()
        .map(|f| paths::relative_display(&job.root, f))
        .collect();

    writeln!(out, "{TOC_TITLE}\n{light}")?;
    for (i, rel) in relative.iter().enumerate() {
        writeln!(out, "{}. {rel}", i + 1)?;
    }

    writeln!(out, "\n{heavy}\n{CONTENTS_TITLE}\n{heavy}\n")?;

    let mut counts = Counts::default();
    for (i, (file, rel)) in job.files.iter().zip(&relative).enumerate() {
        on_progress(Progress {
            percent: (i * 100 / total) as u8,
            status: STATUS_COMBINING.to_string(),
        });
        write!(out, "((({rel})))\n\n")?;
        write_file_body(file, out, &mut counts)?;
        write!(out, "\n\n")?;
    }
    Ok(counts)
}

fn write_file_body<W: Write>(
    file: &Path,
    out: &mut W,
    counts: &mut Counts,
) -> io::Result<()> {
    match decode::read_text(file) {
        Ok((text, encoding)) => {
            if encoding == TextEncoding::Latin1 {
                debug!("{:?} is not valid UTF-8, decoded as Latin-1", file);
                counts.latin1 += 1;
            }
            out.write_all(text.as_bytes())
        }
        Err(e) => {
            warn!("Could not read {:?}: {e}", file);
            counts.unreadable += 1;
            write!(out, "[Error reading file: {e}]")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn job_in(td: &tempfile::TempDir) -> CombineJob {
        let root = td.path().join("proj");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("a.txt"), "hello").unwrap();
        fs::write(root.join("sub/b.txt"), "world").unwrap();
        CombineJob {
            files: vec![root.join("a.txt"), root.join("sub/b.txt")],
            output: td.path().join("out.txt"),
            root,
        }
    }

    #[test]
    fn empty_inputs_fail_validation_without_io() {
        let engine = CombinerEngine::new();
        let mut calls = 0;
        let err = engine
            .combine(&CombineJob::default(), |_| calls += 1)
            .unwrap_err();
        assert!(matches!(err, CombineError::Validation(_)));
        assert_eq!(calls, 0);

        let td = tempfile::tempdir().unwrap();
        let mut job = job_in(&td);
        job.files.clear();
        assert!(matches!(
            engine.combine(&job, |_| {}),
            Err(CombineError::Validation(_))
        ));
        assert!(!job.output.exists());
    }

    #[test]
    fn progress_is_floor_percent_then_done() {
        let td = tempfile::tempdir().unwrap();
        let mut job = job_in(&td);
        fs::write(job.root.join("c.txt"), "!").unwrap();
        job.files.push(job.root.join("c.txt"));

        let mut seen = Vec::new();
        let summary = CombinerEngine::new()
            .combine(&job, |p| seen.push(p))
            .unwrap();
        let percents: Vec<u8> = seen.iter().map(|p| p.percent).collect();
        assert_eq!(percents, [0, 33, 66, 100]);
        assert_eq!(seen[0].status, "Combining files...");
        assert_eq!(seen[3].status, "done");
        assert_eq!(summary.files, 3);
    }

    #[test]
    fn vanished_file_degrades_to_placeholder() {
        let td = tempfile::tempdir().unwrap();
        let mut job = job_in(&td);
        job.files.insert(1, job.root.join("gone.txt"));

        let summary = CombinerEngine::new().combine(&job, |_| {}).unwrap();
        assert_eq!(summary.unreadable, 1);
        let text = fs::read_to_string(&job.output).unwrap();
        assert!(text.contains("(((gone.txt)))\n\n[Error reading file: "));
        assert!(text.contains("(((sub/b.txt)))\n\nworld\n\n"));
    }

    #[test]
    fn run_ends_with_single_done_event() {
        let td = tempfile::tempdir().unwrap();
        let job = job_in(&td);
        let (tx, rx) = mpsc::channel();
        CombinerEngine::new().run(&job, &tx);
        drop(tx);

        let events: Vec<CombineEvent> = rx.iter().collect();
        let dones = events
            .iter()
            .filter(|e| matches!(e, CombineEvent::Done(_)))
            .count();
        assert_eq!(dones, 1);
        match events.last() {
            Some(CombineEvent::Done(Ok(summary))) => {
                assert!(summary.message().starts_with("Successfully combined 2 files to "));
            }
            other => panic!("unexpected last event: {other:?}"),
        }
    }

    #[test]
    fn spawn_rejects_invalid_job_before_returning() {
        let td = tempfile::tempdir().unwrap();
        let mut job = job_in(&td);
        job.files.clear();
        let output = job.output.clone();

        let handle = CombinerEngine::new().spawn(job).unwrap();
        assert!(!handle.is_running());
        match handle.events.try_recv() {
            Ok(CombineEvent::Done(Err(CombineError::Validation(msg)))) => {
                assert_eq!(msg, "Please select files to combine.");
            }
            other => panic!("expected an immediate validation failure, got {other:?}"),
        }
        assert!(handle.events.try_recv().is_err());
        handle.join().unwrap();
        assert!(!output.exists());
    }
}
