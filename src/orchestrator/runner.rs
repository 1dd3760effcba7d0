//! Blocking process execution behind a trait so orchestration can be driven by fakes.

use crate::runtime::WrappedCommand;
use std::io::{self, Read};
use std::process::{Child, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const DRAIN_GRACE: Duration = Duration::from_millis(500);

/// What one viewer invocation left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when killed by a signal or by the timeout.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ProcessOutput {
    /// stderr then stdout, trimmed, for error reports.
    pub fn combined(&self) -> String {
        let mut parts = Vec::new();
        if !self.stderr.trim().is_empty() {
            parts.push(self.stderr.trim());
        }
        if !self.stdout.trim().is_empty() {
            parts.push(self.stdout.trim());
        }
        parts.join("\n")
    }
}

/// Runs a wrapped command to completion.
pub trait ProcessRunner {
    fn run(&self, command: &WrappedCommand) -> io::Result<ProcessOutput>;
}

/// Spawns real processes. With a timeout the child is polled and, when the deadline
/// passes, its whole process group is killed so helpers it forked (the X server, the
/// JVM) go down with it.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    timeout: Option<Duration>,
}

impl SystemRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &WrappedCommand) -> io::Result<ProcessOutput> {
        let mut process = command.to_command();
        process
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            process.process_group(0);
        }
        let mut child = process.spawn()?;

        let stdout_drain = child.stdout.take().map(drain);
        let stderr_drain = child.stderr.take().map(drain);

        let (status, timed_out) = match self.timeout {
            None => (child.wait()?, false),
            Some(limit) => {
                let started = Instant::now();
                loop {
                    if let Some(status) = child.try_wait()? {
                        break (status, false);
                    }
                    if started.elapsed() >= limit {
                        tracing::warn!(
                            program = %command.program.to_string_lossy(),
                            timeout_secs = limit.as_secs(),
                            "Viewer timed out, killing process group"
                        );
                        kill_tree(&mut child)?;
                        break (child.wait()?, true);
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
            }
        };

        // After a kill, a descendant outside the group may still hold the pipes.
        let grace = timed_out.then_some(DRAIN_GRACE);
        Ok(ProcessOutput {
            code: exit_code(status, timed_out),
            stdout: collect_drain(stdout_drain, grace)?,
            stderr: collect_drain(stderr_drain, grace)?,
            timed_out,
        })
    }
}

#[cfg(unix)]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    // The child leads its own group (process_group(0)), so its pid is the pgid.
    let pgid = child.id() as libc::pid_t;
    // SAFETY: kill(2) with a negative pid only signals; it touches no memory.
    if unsafe { libc::kill(-pgid, libc::SIGKILL) } == 0 {
        return Ok(());
    }
    child.kill()
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) -> io::Result<()> {
    child.kill()
}

type Drain = Receiver<io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(mut reader: R) -> Drain {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        let mut bytes = Vec::new();
        let result = reader.read_to_end(&mut bytes).map(|_| bytes);
        let _ = sender.send(result);
    });
    receiver
}

fn collect_drain(drain: Option<Drain>, grace: Option<Duration>) -> io::Result<String> {
    let Some(drain) = drain else {
        return Ok(String::new());
    };
    let received = match grace {
        None => drain.recv().map_err(|_| {
            io::Error::new(io::ErrorKind::Other, "output drain thread panicked")
        })?,
        Some(limit) => match drain.recv_timeout(limit) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => return Ok(String::new()),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "output drain thread panicked",
                ))
            }
        },
    };
    Ok(String::from_utf8_lossy(&received?).into_owned())
}

fn exit_code(status: ExitStatus, timed_out: bool) -> Option<i32> {
    if timed_out {
        None
    } else {
        status.code()
    }
}
