use std::collections::HashSet;
use tokio::sync::Mutex;

/// One-shot claims over trade jobs, keyed by verification code.
///
/// A claim is never released, not even when the job fails, so a
/// redelivered job is dropped instead of racing or repeating work that
/// may already have sent an offer.
#[derive(Debug, Default)]
pub struct JobClaims {
    claimed: Mutex<HashSet<String>>,
}

impl JobClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a job. Returns false if the code was already claimed.
    pub async fn claim(&self, verification_code: &str) -> bool {
        self.claimed
            .lock()
            .await
            .insert(verification_code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_claim_wins_and_holds() {
        let claims = JobClaims::new();
        assert!(claims.claim("VX91KQ").await);
        assert!(!claims.claim("VX91KQ").await);
        assert!(claims.claim("AB12CD").await);
    }
}
