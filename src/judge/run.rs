use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// How a supervised run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Exited(ExitStatus),
    TimedOut,
}

#[derive(Debug)]
pub struct RunOutput {
    pub status: RunStatus,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl RunOutput {
    pub fn success(&self) -> bool {
        matches!(self.status, RunStatus::Exited(st) if st.success())
    }

    /// Exit code, if the process exited normally.
    pub fn code(&self) -> Option<i32> {
        match self.status {
            RunStatus::Exited(st) => st.code(),
            RunStatus::TimedOut => None,
        }
    }
}

/// Runs `script` with `sh -c`, feeding `input` on stdin and capturing
/// stdout/stderr. The whole process group is killed once `timeout` elapses,
/// and again after the child exits so nothing it left running outlives the run.
pub fn run_with_input(script: &str, input: &str, timeout: Duration) -> Result<RunOutput> {
    let start = Instant::now();
    let mut child = spawn_sh(script)?;

    let stdin = child.stdin.take().context("child missing stdin pipe")?;
    let out_pipe = child.stdout.take().context("child missing stdout pipe")?;
    let err_pipe = child.stderr.take().context("child missing stderr pipe")?;
    let input = input.to_string();
    let in_thread = std::thread::spawn(move || {
        let mut stdin = stdin;
        // The child may exit without reading everything; a broken pipe is fine.
        let _ = stdin.write_all(input.as_bytes());
    });
    let out_thread = spawn_reader(out_pipe);
    let err_thread = spawn_reader(err_pipe);

    let status = supervise_child(&mut child, timeout)?;
    let elapsed = start.elapsed();
    // Background processes left behind by the child can hold the pipes open.
    kill_child_group(&mut child);

    let extra = Duration::from_secs(2);
    let stdout = join_with_timeout(out_thread, extra).unwrap_or_default();
    let stderr = join_with_timeout(err_thread, extra).unwrap_or_default();
    let _ = join_with_timeout(in_thread, extra);

    Ok(RunOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        elapsed,
    })
}

fn spawn_sh(script: &str) -> Result<Child> {
    let mut cmd = Command::new("sh");
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        unsafe {
            cmd.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }
    }
    let child = cmd
        .arg("-c")
        .arg(script)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to execute command: {}", script))?;
    Ok(child)
}

#[cfg(unix)]
fn kill_child_group(child: &mut Child) {
    // Kill the whole process group (-pid)
    unsafe {
        let pid = child.id() as i32;
        libc::kill(-pid, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_child_group(child: &mut Child) {
    let _ = child.kill();
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = vec![];
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn supervise_child(child: &mut Child, timeout: Duration) -> Result<RunStatus> {
    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(RunStatus::Exited(status));
        }
        if start.elapsed() > timeout {
            kill_child_group(child);
            // Reap; SIGKILL on the group leader cannot be ignored.
            let _ = child.wait();
            return Ok(RunStatus::TimedOut);
        }
        std::thread::sleep(Duration::from_millis(5));
    }
}

/// Joins a pipe thread, giving up after `dur` in case a process outside the
/// group still holds the pipe open.
fn join_with_timeout<T: Send + 'static>(h: JoinHandle<T>, dur: Duration) -> Option<T> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        if let Ok(v) = h.join() {
            let _ = tx.send(v);
        }
    });
    rx.recv_timeout(dur).ok()
}
