//! `lingva-panel send`: deliver selected text to the panel.
//!
//! A running panel listens on the loopback handoff port and takes the text
//! directly. Without one, the text goes to the mailbox and a panel is
//! launched to pick it up.

use crate::services::Services;
use anyhow::{Context, Result};
use lingva_core::{Delivery, HandoffPayload, InboundMessage};
use std::io::Write;
use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_millis(300);

pub fn send_text(services: &Services, port: u16, text: String, open_panel: bool) -> Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
    let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT).ok();
    let payload = HandoffPayload { text };

    match services.mailbox.post(payload, stream.is_some())? {
        Delivery::Direct(payload) => {
            let Some(stream) = stream else {
                return Ok(());
            };
            if let Err(err) = write_message(stream, &payload) {
                warn!("Direct delivery failed, storing for next activation: {err:#}");
                services.mailbox.put(&payload)?;
                return launch_panel(open_panel);
            }
            info!(%addr, "Delivered text to running panel");
            Ok(())
        }
        Delivery::Stored => launch_panel(open_panel),
    }
}

fn write_message(mut stream: TcpStream, payload: &HandoffPayload) -> Result<()> {
    let mut line = serde_json::to_string(&InboundMessage::translate(payload.text.clone()))
        .context("encoding handoff message")?;
    line.push('\n');
    stream
        .write_all(line.as_bytes())
        .context("writing handoff message")?;
    stream.flush().context("flushing handoff message")?;
    Ok(())
}

fn launch_panel(open_panel: bool) -> Result<()> {
    if !open_panel {
        info!("Text stored; panel will pick it up when opened");
        return Ok(());
    }
    let exe = std::env::current_exe().context("locating panel executable")?;
    Command::new(&exe)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("launching {}", exe.display()))?;
    info!("Launched panel to consume stored text");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;

    fn services_in(dir: &tempfile::TempDir) -> Services {
        let config = AppConfig {
            data_dir: dir.path().display().to_string(),
            ..AppConfig::default()
        };
        Services::from_config(&config).unwrap()
    }

    #[test]
    fn running_panel_receives_a_json_line() {
        let dir = tempfile::tempdir().unwrap();
        let services = services_in(&dir);
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
        let port = listener.local_addr().unwrap().port();

        send_text(&services, port, "bonjour".to_string(), false).unwrap();

        let (stream, _) = listener.accept().unwrap();
        let mut line = String::new();
        BufReader::new(stream).read_line(&mut line).unwrap();
        assert_eq!(
            lingva_core::handoff::parse_inbound(&line),
            Some(HandoffPayload {
                text: "bonjour".to_string()
            })
        );
        assert_eq!(services.mailbox.take().unwrap(), None);
    }

    #[test]
    fn absent_panel_leaves_text_in_mailbox() {
        let dir = tempfile::tempdir().unwrap();
        let services = services_in(&dir);
        let port = {
            let probe = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
            probe.local_addr().unwrap().port()
        };

        send_text(&services, port, "hola".to_string(), false).unwrap();

        assert_eq!(
            services.mailbox.take().unwrap(),
            Some(HandoffPayload {
                text: "hola".to_string()
            })
        );
    }
}
