//! # Process Supervision Module / 进程监管模块
//!
//! This module owns the lifecycle of one supervised child process: it
//! spawns the command with piped output, drains stdout and stderr
//! concurrently while echoing every line to the console, and watches for
//! stalled runs. A process that stays silent for longer than the idle
//! window is killed; its result then carries no exit code.
//!
//! 此模块负责单个被监管子进程的生命周期：以管道输出方式派生命令，
//! 并发读取 stdout 和 stderr，同时将每一行回显到控制台，并监视停滞的运行。
//! 静默时间超过空闲窗口的进程会被终止；其结果随后不携带退出码。

use anyhow::{Context, Result, anyhow};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::core::models::CommandResult;
use crate::infra::t;

/// How a single stream drain ended.
/// 单个流读取结束的方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// The stream reached end of file; the writer closed its end.
    /// 流到达末尾；写入端已关闭。
    Closed,
    /// No complete line arrived within the idle window.
    /// 在空闲窗口内没有收到完整的一行。
    TimedOut,
}

/// Reads a stream line by line, forwarding each line to `on_line`.
///
/// Every read is bounded by `idle_timeout`, and each received line restarts
/// the window, so the bound is on silence, not on total runtime. Reading
/// stops at end of file (`Closed`) or when the window elapses (`TimedOut`).
/// A read error on a dying pipe counts as end of file.
///
/// 逐行读取一个流，并将每一行转发给 `on_line`。
/// 每次读取都受 `idle_timeout` 限制，且每收到一行都会重置窗口，
/// 因此限制的是静默时间而不是总运行时间。读取在流结束（`Closed`）
/// 或窗口耗尽（`TimedOut`）时停止。管道断开导致的读取错误视同流结束。
pub async fn drain<R, F>(stream: R, mut on_line: F, idle_timeout: Duration) -> DrainOutcome
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut lines = BufReader::new(stream).lines();
    loop {
        match tokio::time::timeout(idle_timeout, lines.next_line()).await {
            Ok(Ok(Some(line))) => on_line(&line),
            Ok(Ok(None)) => return DrainOutcome::Closed,
            Ok(Err(_)) => return DrainOutcome::Closed,
            Err(_) => return DrainOutcome::TimedOut,
        }
    }
}

/// Spawns a command and supervises it with an idle timeout.
///
/// Both output pipes are drained concurrently; every line is echoed live
/// (stdout to stdout, stderr to stderr) and buffered into the result.
/// When both drains report a timeout, the run counts as one stall: the
/// process is killed exactly once and the result carries no exit code.
/// When both pipes close, the natural exit code is collected. When only
/// one pipe closed, the final wait is bounded by one more idle window so
/// a half-dead child cannot hang the supervisor.
///
/// A spawn failure is an error raised to the caller, never a result.
///
/// 派生一个命令并以空闲超时对其进行监管。
/// 两个输出管道被并发读取；每一行都实时回显（stdout 到 stdout，
/// stderr 到 stderr）并缓存到结果中。当两个读取都报告超时时，
/// 这次运行记为一次停滞：进程只被终止一次，结果不携带退出码。
/// 当两个管道都关闭时，收集自然退出码。当只有一个管道关闭时，
/// 最后的等待再受一个空闲窗口限制，以免半死的子进程挂起监管器。
///
/// 派生失败是抛给调用者的错误，而不是结果。
pub async fn run_with_idle_timeout(
    mut cmd: Command,
    idle_timeout: Duration,
) -> Result<CommandResult> {
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| t!("command.spawn_failed"))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!(t!("command.capture_stdout_failed")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!(t!("command.capture_stderr_failed")))?;

    let mut stdout_buf = String::new();
    let mut stderr_buf = String::new();

    // Both drains run in this task, so the kill decision below sees both
    // outcomes at once and can only fire once.
    // 两个读取都在本任务中运行，因此下面的终止决策能同时看到两个结果，
    // 且只会触发一次。
    let (stdout_outcome, stderr_outcome) = tokio::join!(
        drain(
            stdout,
            |line| {
                println!("{line}");
                stdout_buf.push_str(line);
                stdout_buf.push('\n');
            },
            idle_timeout,
        ),
        drain(
            stderr,
            |line| {
                eprintln!("{line}");
                stderr_buf.push_str(line);
                stderr_buf.push('\n');
            },
            idle_timeout,
        ),
    );

    let exit_code = match (stdout_outcome, stderr_outcome) {
        (DrainOutcome::TimedOut, DrainOutcome::TimedOut) => {
            // One stall event for the whole process. A kill failure here
            // means the child is already gone.
            // 整个进程只记一次停滞。此处终止失败意味着子进程已经不在了。
            let _ = child.kill().await;
            None
        }
        (DrainOutcome::Closed, DrainOutcome::Closed) => {
            let status = child
                .wait()
                .await
                .with_context(|| t!("command.wait_failed"))?;
            exit_code_of(&status)
        }
        _ => {
            // One pipe closed while the other went silent. The exit may
            // still be imminent; grant one more idle window before
            // reclaiming the child.
            // 一个管道关闭而另一个陷入静默。进程可能即将退出；
            // 在回收子进程前再给一个空闲窗口。
            match tokio::time::timeout(idle_timeout, child.wait()).await {
                Ok(status) => {
                    exit_code_of(&status.with_context(|| t!("command.wait_failed"))?)
                }
                Err(_) => {
                    let _ = child.kill().await;
                    None
                }
            }
        }
    };

    Ok(CommandResult {
        exit_code,
        stdout: stdout_buf,
        stderr: stderr_buf,
    })
}

/// A signal death reports as a negative code, the way a shell reports it,
/// so `None` stays reserved for idle-timeout kills.
/// 信号导致的死亡以负数退出码表示（与 shell 的表示方式一致），
/// 因而 `None` 始终只表示空闲超时终止。
#[cfg(unix)]
fn exit_code_of(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.code().or_else(|| status.signal().map(|sig| -sig))
}

#[cfg(not(unix))]
fn exit_code_of(status: &std::process::ExitStatus) -> Option<i32> {
    status.code()
}
