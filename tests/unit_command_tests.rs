//! # Command Module Unit Tests / Command 模块单元测试
//!
//! This module contains comprehensive unit tests for the `command.rs` module,
//! testing both the `drain` stream reader and the `run_with_idle_timeout`
//! process supervisor.
//!
//! 此模块包含 `command.rs` 模块的全面单元测试，
//! 测试 `drain` 流读取器和 `run_with_idle_timeout` 进程监督器。

use module_runner::infra::command::{drain, run_with_idle_timeout, DrainOutcome};
use std::time::{Duration, Instant};
use tokio::process::Command;

#[cfg(test)]
mod drain_tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn test_drain_reads_all_lines_until_eof() {
        // 内存切片立即到达 EOF
        let stream: &[u8] = b"first line\nsecond line\nthird line\n";
        let mut lines = Vec::new();

        let outcome = drain(
            stream,
            |line| lines.push(line.to_string()),
            Duration::from_secs(1),
        )
        .await;

        assert_eq!(outcome, DrainOutcome::Closed);
        assert_eq!(lines, vec!["first line", "second line", "third line"]);
    }

    #[tokio::test]
    async fn test_drain_empty_stream_closes_immediately() {
        let stream: &[u8] = b"";
        let mut lines = Vec::new();

        let outcome = drain(
            stream,
            |line| lines.push(line.to_string()),
            Duration::from_millis(100),
        )
        .await;

        assert_eq!(outcome, DrainOutcome::Closed);
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_drain_timer_resets_on_each_line() {
        // 每行之间的间隔小于空闲窗口，定时器必须随行重置
        let (mut writer, reader) = tokio::io::duplex(1024);

        let producer = tokio::spawn(async move {
            for i in 1..=3 {
                writer
                    .write_all(format!("tick {i}\n").as_bytes())
                    .await
                    .unwrap();
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            // writer 在此被丢弃，流关闭
        });

        let mut lines = Vec::new();
        let outcome = drain(
            reader,
            |line| lines.push(line.to_string()),
            Duration::from_millis(500),
        )
        .await;

        producer.await.unwrap();
        assert_eq!(outcome, DrainOutcome::Closed);
        assert_eq!(lines, vec!["tick 1", "tick 2", "tick 3"]);
    }

    #[tokio::test]
    async fn test_drain_times_out_while_stream_stays_open() {
        let (mut writer, reader) = tokio::io::duplex(1024);

        let producer = tokio::spawn(async move {
            writer.write_all(b"start\n").await.unwrap();
            // 保持写端打开，不再产生任何行
            tokio::time::sleep(Duration::from_secs(1)).await;
            drop(writer);
        });

        let mut lines = Vec::new();
        let started = Instant::now();
        let outcome = drain(
            reader,
            |line| lines.push(line.to_string()),
            Duration::from_millis(200),
        )
        .await;

        assert_eq!(outcome, DrainOutcome::TimedOut);
        assert_eq!(lines, vec!["start"]);
        assert!(started.elapsed() < Duration::from_secs(1));
        producer.abort();
    }

    #[tokio::test]
    async fn test_drain_does_not_deliver_partial_line_on_timeout() {
        let (mut writer, reader) = tokio::io::duplex(1024);

        let producer = tokio::spawn(async move {
            writer.write_all(b"complete\nno newline yet").await.unwrap();
            tokio::time::sleep(Duration::from_secs(1)).await;
            drop(writer);
        });

        let mut lines = Vec::new();
        let outcome = drain(
            reader,
            |line| lines.push(line.to_string()),
            Duration::from_millis(200),
        )
        .await;

        // 未终结的行在超时时不可见
        assert_eq!(outcome, DrainOutcome::TimedOut);
        assert_eq!(lines, vec!["complete"]);
        producer.abort();
    }
}

#[cfg(test)]
mod run_with_idle_timeout_tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command_captures_stdout() {
        #[cfg(target_os = "windows")]
        let cmd = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "echo Hello, World!"]);
            cmd
        };

        #[cfg(not(target_os = "windows"))]
        let cmd = {
            let mut cmd = Command::new("echo");
            cmd.arg("Hello, World!");
            cmd
        };

        let result = run_with_idle_timeout(cmd, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("Hello, World!"));
        assert!(!result.timed_out());
    }

    #[tokio::test]
    async fn test_streams_are_kept_separate() {
        #[cfg(target_os = "windows")]
        let cmd = {
            let mut cmd = Command::new("powershell");
            cmd.args([
                "-Command",
                "Write-Output 'on stdout'; [Console]::Error.WriteLine('on stderr'); exit 3",
            ]);
            cmd
        };

        #[cfg(not(target_os = "windows"))]
        let cmd = {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", "echo 'on stdout'; echo 'on stderr' >&2; exit 3"]);
            cmd
        };

        let result = run_with_idle_timeout(cmd, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.exit_code, Some(3));
        assert!(result.stdout.contains("on stdout"));
        assert!(!result.stdout.contains("on stderr"));
        assert!(result.stderr.contains("on stderr"));
    }

    #[tokio::test]
    async fn test_nonzero_exit_code_is_reported() {
        #[cfg(target_os = "windows")]
        let cmd = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "exit 1"]);
            cmd
        };

        #[cfg(not(target_os = "windows"))]
        let cmd = {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", "exit 1"]);
            cmd
        };

        let result = run_with_idle_timeout(cmd, Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result.exit_code, Some(1));
    }

    #[tokio::test]
    async fn test_nonexistent_command_is_an_error() {
        let cmd = Command::new("this_command_does_not_exist_12345");

        let err = format!(
            "{:#}",
            run_with_idle_timeout(cmd, Duration::from_secs(1))
                .await
                .unwrap_err()
        );
        assert!(err.contains("Failed to spawn the runner process"), "got: {err}");
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_idle_command_is_killed_and_has_no_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo started; sleep 5"]);

        let started = Instant::now();
        let result = run_with_idle_timeout(cmd, Duration::from_millis(300))
            .await
            .unwrap();

        // 空闲终止：无退出码，且远早于 sleep 结束前返回
        assert_eq!(result.exit_code, None);
        assert!(result.timed_out());
        assert!(result.stdout.contains("started"));
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_steady_output_keeps_slow_command_alive() {
        // 整体耗时超过空闲窗口，但每行间隔都在窗口之内
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "for i in 1 2 3; do echo tick $i; sleep 0.4; done"]);

        let result = run_with_idle_timeout(cmd, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("tick 1"));
        assert!(result.stdout.contains("tick 3"));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_signal_death_maps_to_negative_exit_code() {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "kill -TERM $$"]);

        let result = run_with_idle_timeout(cmd, Duration::from_secs(5))
            .await
            .unwrap();

        // SIGTERM 死亡映射为 -15，而不是与空闲终止共用 None
        assert_eq!(result.exit_code, Some(-15));
        assert!(!result.timed_out());
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_one_closed_stream_does_not_block_the_idle_kill() {
        // stdout 立即关闭，stderr 保持打开且沉默
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exec 1>&-; sleep 2"]);

        let started = Instant::now();
        let result = run_with_idle_timeout(cmd, Duration::from_millis(300))
            .await
            .unwrap();

        assert_eq!(result.exit_code, None);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_exit_shortly_after_single_stream_timeout_is_not_a_kill() {
        // stderr 立即关闭；stdout 在窗口耗尽后不久产出并退出。
        // 监督器在终止前额外等待一个空闲窗口，应拿到真实退出码。
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exec 2>&-; sleep 0.6; echo bye"]);

        let result = run_with_idle_timeout(cmd, Duration::from_millis(400))
            .await
            .unwrap();

        assert_eq!(result.exit_code, Some(0));
        assert!(!result.timed_out());
    }
}
