//! Line pumps between the process's stdio and the MCP service
//!
//! The service reads and writes newline-delimited JSON-RPC on one end of an
//! in-memory pipe; two pumps copy lines between the other end and the real
//! input and output. The input pump counts requests, the output pump counts
//! the responses it has written, and when input reaches end-of-file the pipe
//! is only closed once every request read so far has been answered.

use serde_json::Value;
use std::io;
use std::sync::Arc;
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, DuplexStream, ReadHalf,
    WriteHalf,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Capacity of the in-memory pipe in each direction
const PIPE_CAPACITY: usize = 64 * 1024;

/// Requests read but not yet answered
type Outstanding = Arc<watch::Sender<i64>>;

/// Pumps running for one service; aborted on drop
pub(crate) struct LinePumps {
    input: JoinHandle<io::Result<()>>,
    output: JoinHandle<io::Result<()>>,
}

impl Drop for LinePumps {
    fn drop(&mut self) {
        self.input.abort();
        self.output.abort();
    }
}

/// Start pumping `input` and `output` and return the service's end of the pipe
pub(crate) fn spawn_line_pumps<R, W>(input: R, output: W) -> (DuplexStream, LinePumps)
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (service_end, pump_end) = tokio::io::duplex(PIPE_CAPACITY);
    let (from_service, to_service) = tokio::io::split(pump_end);
    let outstanding: Outstanding = Arc::new(watch::channel(0).0);

    let pumps = LinePumps {
        input: tokio::spawn(pump_input(input, to_service, outstanding.clone())),
        output: tokio::spawn(pump_output(from_service, output, outstanding)),
    };
    (service_end, pumps)
}

async fn pump_input<R>(
    input: R,
    mut to_service: WriteHalf<DuplexStream>,
    outstanding: Outstanding,
) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();
    while let Some(line) = lines.next_line().await? {
        let requests = count_messages(&line, is_request);
        if requests > 0 {
            outstanding.send_modify(|n| *n += requests);
        }
        to_service.write_all(line.as_bytes()).await?;
        to_service.write_all(b"\n").await?;
    }

    let mut pending = outstanding.subscribe();
    let in_flight = *pending.borrow();
    if in_flight > 0 {
        tracing::debug!(in_flight, "Input closed; waiting for in-flight calls");
    }
    // The output pump holds the sender, so this only fails once it has stopped
    let _ = pending.wait_for(|n| *n <= 0).await;

    to_service.shutdown().await
}

async fn pump_output<W>(
    from_service: ReadHalf<DuplexStream>,
    mut output: W,
    outstanding: Outstanding,
) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(from_service).lines();
    while let Some(line) = lines.next_line().await? {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;

        let answered = count_messages(&line, is_response);
        if answered > 0 {
            outstanding.send_modify(|n| *n -= answered);
        }
    }
    Ok(())
}

/// Count the JSON-RPC messages on one line that satisfy `matches`, looking
/// inside batches
fn count_messages(line: &str, matches: fn(&Value) -> bool) -> i64 {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Array(batch)) => batch.iter().filter(|m| matches(m)).count() as i64,
        Ok(message) => i64::from(matches(&message)),
        Err(_) => 0,
    }
}

fn is_request(message: &Value) -> bool {
    message.get("method").is_some() && message.get("id").is_some()
}

fn is_response(message: &Value) -> bool {
    message.get("method").is_none()
        && message.get("id").is_some()
        && (message.get("result").is_some() || message.get("error").is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;

    #[test]
    fn test_counts_requests_and_responses() {
        let request = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let notification = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        let response = r#"{"jsonrpc":"2.0","id":1,"result":{}}"#;
        let batch = format!("[{request},{notification},{request}]");

        assert_eq!(count_messages(request, is_request), 1);
        assert_eq!(count_messages(notification, is_request), 0);
        assert_eq!(count_messages(&batch, is_request), 2);
        assert_eq!(count_messages(response, is_response), 1);
        assert_eq!(count_messages(request, is_response), 0);
        assert_eq!(count_messages("not json", is_request), 0);
    }

    #[tokio::test]
    async fn test_input_stays_open_until_requests_are_answered() {
        let (mut client, input) = tokio::io::duplex(1024);
        let (output, mut observer) = tokio::io::duplex(1024);
        let (service, _pumps) = spawn_line_pumps(input, output);
        let (mut service_rx, mut service_tx) = tokio::io::split(service);

        client
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"tools/list\"}\n")
            .await
            .unwrap();
        drop(client);

        let mut received = String::new();
        let mut buf = [0u8; 256];
        while !received.ends_with('\n') {
            let n = service_rx.read(&mut buf).await.unwrap();
            received.push_str(std::str::from_utf8(&buf[..n]).unwrap());
        }
        assert!(received.contains("\"id\":7"));

        // Client input is closed but the call is unanswered, so no EOF yet
        let early =
            tokio::time::timeout(Duration::from_millis(200), service_rx.read(&mut buf)).await;
        assert!(early.is_err(), "input closed before the response was written");

        service_tx
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":7,\"result\":{}}\n")
            .await
            .unwrap();

        let eof = tokio::time::timeout(Duration::from_secs(5), service_rx.read(&mut buf))
            .await
            .expect("input should close once the call is answered")
            .unwrap();
        assert_eq!(eof, 0);

        let mut written = vec![0u8; 256];
        let n = observer.read(&mut written).await.unwrap();
        assert!(std::str::from_utf8(&written[..n]).unwrap().contains("\"result\""));
    }
}
