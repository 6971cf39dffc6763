//! Runs the contact form's single outbound send off the event-loop thread.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use termfolio_net::{ContactMessage, EmailRelay};
use termfolio_types::error::Result;

/// Send `msg` on a fresh thread. The receiver yields exactly one result.
pub fn spawn_send(relay: Arc<dyn EmailRelay>, msg: ContactMessage) -> Result<Receiver<Result<()>>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("contact-relay".into())
        .spawn(move || {
            log::debug!("Sending contact message from {}", msg.email);
            let result = relay.send(&msg);
            // The receiver is gone if the session reloaded meanwhile.
            if tx.send(result).is_err() {
                log::debug!("Contact send result dropped");
            }
        })?;
    Ok(rx)
}
