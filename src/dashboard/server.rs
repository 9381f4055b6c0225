use super::handler::Dashboard;
use crate::error::Result;
use crate::models::{DashboardRequest, RequestOverrides};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

#[derive(Debug, Serialize)]
struct ErrorReply {
    error: String,
}

/// Line-delimited JSON request loop.
///
/// Each input line holds a [`RequestOverrides`] object applied on top of the
/// current widget state, which starts at the dashboard defaults and is only
/// advanced by requests that succeed. Each request gets exactly one output
/// line: the response, or `{"error": ...}`. Returns the number of requests
/// handled.
pub async fn serve_lines<R, W>(dashboard: &Dashboard, reader: R, mut writer: W) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut state = dashboard.default_request();
    let mut lines = reader.lines();
    let mut handled = 0;

    info!("Serving dashboard requests");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        handled += 1;

        let reply = match handle_line(dashboard, &state, line) {
            Ok((request, body)) => {
                state = request;
                body
            }
            Err(e) => {
                warn!(error = %e, "Rejected dashboard request");
                serde_json::to_string(&ErrorReply {
                    error: e.to_string(),
                })?
            }
        };

        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    debug!(handled, "Request stream closed");
    Ok(handled)
}

fn handle_line(
    dashboard: &Dashboard,
    state: &DashboardRequest,
    line: &str,
) -> Result<(DashboardRequest, String)> {
    let overrides: RequestOverrides = serde_json::from_str(line)?;
    let request = overrides.apply(state.clone());
    let response = dashboard.handle(&request)?;
    Ok((request, serde_json::to_string(&response)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{TemperatureRecord, TemperatureTable};
    use serde_json::Value;

    fn dashboard() -> Dashboard {
        let table = TemperatureTable::new(vec![
            TemperatureRecord::new("India".to_string(), 2000, 24.0, 18.0, 30.0),
            TemperatureRecord::new("Norway".to_string(), 2000, 1.0, -4.0, 6.0),
            TemperatureRecord::new("Norway".to_string(), 2001, 1.4, -3.5, 6.2),
        ]);
        Dashboard::new(table, Settings::default())
    }

    #[tokio::test]
    async fn test_requests_carry_widget_state() {
        let input = concat!(
            "{\"country\": \"Norway\"}\n",
            "\n",
            "{\"start_year\": 2001, \"end_year\": 2000}\n",
            "not json\n",
            "{\"start_year\": 2001}\n",
        );
        let mut output = Vec::new();

        let handled = serve_lines(&dashboard(), input.as_bytes(), &mut output)
            .await
            .unwrap();
        assert_eq!(handled, 4);

        let replies: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies.len(), 4);

        assert_eq!(replies[0]["request"]["country"], "Norway");
        assert_eq!(replies[0]["country_rows"], 2);
        assert!(replies[1]["error"].as_str().unwrap().contains("Invalid year range"));
        assert!(replies[2].get("error").is_some());

        // The failed requests did not advance the state
        assert_eq!(replies[3]["request"]["country"], "Norway");
        assert_eq!(replies[3]["request"]["start_year"], 2001);
        assert_eq!(replies[3]["request"]["end_year"], 2022);
        assert_eq!(replies[3]["range_rows"], 1);
    }
}
