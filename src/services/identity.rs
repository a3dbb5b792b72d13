//! Mocked MYiD identity provider. There is no credential exchange: every
//! call succeeds unconditionally after a fixed delay. Unlike the UI-level
//! "disable the button" guard, a pending call carries an explicit
//! cancellation handle so a duplicate trigger can abort the first one.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::models::User;

#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    login_delay: Duration,
    verify_delay: Duration,
}

/// Handle to an in-flight identity call. Dropping the handle without
/// awaiting abandons the call; `cancel` aborts the timer explicitly.
#[derive(Debug)]
pub struct PendingAuth {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<Option<User>>,
}

impl PendingAuth {
    /// Abort the pending call. `wait` will then resolve to `None`.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    /// Resolve the call: `Some(user)` on (unconditional) success, `None`
    /// when cancelled.
    pub async fn wait(self) -> Option<User> {
        self.task.await.unwrap_or(None)
    }
}

impl MockIdentityProvider {
    pub fn new(login_delay: Duration, verify_delay: Duration) -> Self {
        Self { login_delay, verify_delay }
    }

    /// Simulated MYiD sign-in: resolves to the given demo user.
    pub fn authenticate(&self, user: User) -> PendingAuth {
        log::info!("MYiD login started for {}", user.id);
        Self::resolve_after(self.login_delay, user)
    }

    /// Simulated identity verification: resolves to the same user with the
    /// verification flag set.
    pub fn verify(&self, user: User) -> PendingAuth {
        log::info!("MYiD verification started for {}", user.id);
        let verified = User { myid_verified: true, ..user };
        Self::resolve_after(self.verify_delay, verified)
    }

    fn resolve_after(delay: Duration, user: User) -> PendingAuth {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let task = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => Some(user),
                _ = cancel_rx => {
                    log::debug!("identity call cancelled");
                    None
                }
            }
        });
        PendingAuth { cancel: Some(cancel_tx), task }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn demo_user() -> User {
        User {
            id: "user-1".into(),
            name: "Aziz Karimov".into(),
            phone: "+998901112233".into(),
            email: None,
            avatar: None,
            myid_verified: false,
            member_since: Utc::now(),
            location: "Toshkent".into(),
        }
    }

    #[tokio::test]
    async fn authenticate_resolves_to_the_user_after_the_delay() {
        let provider = MockIdentityProvider::new(Duration::from_millis(10), Duration::from_millis(10));
        let pending = provider.authenticate(demo_user());
        let user = pending.wait().await.expect("login must succeed");
        assert_eq!(user.id, "user-1");
    }

    #[tokio::test]
    async fn verify_sets_the_verification_flag() {
        let provider = MockIdentityProvider::new(Duration::from_millis(10), Duration::from_millis(10));
        let user = provider.verify(demo_user()).wait().await.unwrap();
        assert!(user.myid_verified);
    }

    #[tokio::test]
    async fn cancel_resolves_to_none() {
        let provider = MockIdentityProvider::new(Duration::from_secs(60), Duration::from_secs(60));
        let mut pending = provider.authenticate(demo_user());
        pending.cancel();
        assert!(pending.wait().await.is_none());
    }
}
