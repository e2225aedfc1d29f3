// svnwrap-rs: Subversion command wrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Signal forwarding to the running child.
//!
//! ```text
//! SignalForwarder::spawn(pid, scope)
//!   loop select!
//!     token.cancelled()  --> exit
//!     Unix, SignalScope::Group:
//!       SIGINT / SIGTERM --> kill(-pgid, same signal)
//!     Unix, SignalScope::Shared:
//!       SIGINT           --> swallowed, the terminal already
//!                            delivered it to the foreground group
//!       SIGTERM          --> kill(pid, SIGTERM)
//!     Windows:
//!       Ctrl-C           --> swallowed, console already
//!                            delivered it to the child
//! stop() --> cancel + join
//! ```
//!
//! While a forwarder is alive the wrapper itself survives these signals and
//! keeps draining output until the child exits.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Which processes share the child's fate when a signal arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalScope {
    /// Child stays in the wrapper's process group.
    Shared,
    /// Child leads its own process group (pgid == pid), so everything it
    /// started is signalled with it.
    Group,
}

/// Background task relaying termination signals to one child process.
pub struct SignalForwarder {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl SignalForwarder {
    /// Starts forwarding to `pid`. With no pid (child already reaped)
    /// signals are only absorbed.
    #[must_use]
    pub fn spawn(pid: Option<u32>, scope: SignalScope) -> Self {
        let token = CancellationToken::new();
        let child_token = token.clone();
        let handle = tokio::spawn(async move {
            forward_loop(pid, scope, child_token).await;
        });
        Self { token, handle }
    }

    /// Stops forwarding and waits for the task to finish.
    pub async fn stop(self) {
        self.token.cancel();
        let _ = self.handle.await;
    }
}

#[cfg(unix)]
async fn forward_loop(pid: Option<u32>, scope: SignalScope, token: CancellationToken) {
    use nix::sys::signal::Signal;
    use tokio::signal::unix::{SignalKind, signal};

    let (mut interrupt, mut terminate) =
        match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
            (Ok(i), Ok(t)) => (i, t),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "cannot install signal handlers; signals reach the wrapper directly");
                return;
            }
        };

    loop {
        let sig = tokio::select! {
            () = token.cancelled() => break,
            _ = interrupt.recv() => Signal::SIGINT,
            _ = terminate.recv() => Signal::SIGTERM,
        };
        forward(pid, scope, sig);
    }
}

#[cfg(unix)]
fn forward(pid: Option<u32>, scope: SignalScope, sig: nix::sys::signal::Signal) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let Some(raw) = pid.and_then(|pid| i32::try_from(pid).ok()) else {
        return;
    };
    let dest = match (scope, sig) {
        (SignalScope::Shared, Signal::SIGINT) => {
            debug!(pid = raw, "interrupt already delivered to the foreground group");
            return;
        }
        (SignalScope::Shared, _) => raw,
        (SignalScope::Group, _) => -raw,
    };
    debug!(dest, signal = %sig, "forwarding signal");
    if let Err(e) = kill(Pid::from_raw(dest), sig) {
        debug!(dest, error = %e, "signal forwarding failed");
    }
}

#[cfg(not(unix))]
async fn forward_loop(pid: Option<u32>, _scope: SignalScope, token: CancellationToken) {
    loop {
        tokio::select! {
            () = token.cancelled() => break,
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!(error = %e, "cannot listen for Ctrl-C");
                    break;
                }
                debug!(pid = ?pid, "Ctrl-C received; child handles it through the console");
            }
        }
    }
}
