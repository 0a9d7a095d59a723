// Copyright 2024 MaidSafe.net limited.
//
// This SAFE Network Software is licensed to you under The General Public License (GPL), version 3.
// Unless required by applicable law or agreed to in writing, the SAFE Network Software distributed
// under the GPL Licence is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied. Please review the Licences for the specific language governing
// permissions and limitations relating to use of the SAFE Network Software.

//! The crate's single exposed entry point.

use libp2p_identity::PeerId;
use rand::thread_rng;
use tokio_util::sync::CancellationToken;

use crate::config::AuroraConfig;
use crate::error::{AuroraError, Result};
use crate::interfaces::{HeadHashOracle, NeighborLookup, ShutdownSink};
use crate::tally::{tally, TallyOutcome};

const CLIQUE_SHUTDOWN_REASON: &str = "Possible malicious network - exiting!";

/// Ties the walk/tally engine to its three injected collaborators.
pub struct AuroraCore<L, H, S> {
    lookup: L,
    head: H,
    shutdown: S,
    config: AuroraConfig,
}

impl<L, H, S> AuroraCore<L, H, S>
where
    L: NeighborLookup,
    H: HeadHashOracle,
    S: ShutdownSink,
{
    /// Builds a new core over the given collaborators and configuration.
    pub fn new(lookup: L, head: H, shutdown: S, config: AuroraConfig) -> Self {
        Self {
            lookup,
            head,
            shutdown,
            config,
        }
    }

    /// Runs a tally of walks starting from `entry`.
    ///
    /// On [`TallyOutcome::Winner`] or [`TallyOutcome::NoWinner`] this simply
    /// returns. On [`AuroraError::CliqueDetected`] it broadcasts a shutdown
    /// request and returns `Ok(())` — the shutdown request, not a
    /// propagated error, is this core's only externally observable effect.
    pub async fn lookup_random(&self, entry: PeerId) -> Result<()> {
        let (params, thresholds) = self.config.into_params_and_thresholds();
        let cancel = CancellationToken::new();
        let mut rng = thread_rng();

        match tally(
            entry,
            &params,
            &thresholds,
            &self.lookup,
            &self.head,
            &cancel,
            &mut rng,
        )
        .await
        {
            Ok(_outcome) => Ok(()),
            Err(AuroraError::CliqueDetected) => {
                warn!("clique detected during p2p discovery!");
                self.shutdown.broadcast_shutdown(CLIQUE_SHUTDOWN_REASON).await;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
