use std::{sync::Arc, time::Duration};

use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    Mutex,
};

use crate::{
    contract::{
        Address, ContractCall, ContractClient, MemberId, MemberInfo, ProposalId, ProposalInfo,
        Receipt, TransactionId, TreasuryTransactionInfo, TxHash, TxStatus, VoteId,
    },
    error::{ConfigError, DaoError, DaoResult},
    event::Event,
    form::{JoinForm, ProposalForm, TreasuryForm},
};

pub type DaoEventTx = UnboundedSender<Event>;
pub type DaoEventRx = UnboundedReceiver<Event>;
pub type DaoSubscriptions = Arc<Mutex<Vec<DaoEventTx>>>;

const CONTRACT_ADDRESS_VAR: &str = "CONCLAVE_CONTRACT_ADDRESS";
const CONFIRMATION_TIMEOUT_VAR: &str = "CONCLAVE_CONFIRMATION_TIMEOUT_SECS";

pub struct DaoConfig {
    pub contract_address: Address,
    pub confirmation_timeout: Duration,
}

impl DaoConfig {
    pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(contract_address: Address) -> Self {
        Self {
            contract_address,
            confirmation_timeout: Self::DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Read `CONCLAVE_CONTRACT_ADDRESS` and the optional
    /// `CONCLAVE_CONFIRMATION_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|var| std::env::var(var).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let address = var(CONTRACT_ADDRESS_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(CONTRACT_ADDRESS_VAR))?;
        let contract_address = Address::parse(&address).map_err(|e| ConfigError::Invalid {
            var: CONTRACT_ADDRESS_VAR,
            msg: e.to_string(),
        })?;

        let confirmation_timeout = match var(CONFIRMATION_TIMEOUT_VAR) {
            Some(secs) => match secs.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        var: CONFIRMATION_TIMEOUT_VAR,
                        msg: "timeout must be at least one second".into(),
                    })
                }
                Ok(secs) => Duration::from_secs(secs),
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: CONFIRMATION_TIMEOUT_VAR,
                        msg: format!("{e}"),
                    })
                }
            },
            None => Self::DEFAULT_CONFIRMATION_TIMEOUT,
        };

        Ok(Self {
            contract_address,
            confirmation_timeout,
        })
    }
}

/// Wallet-bound session against the DAO contract.
///
/// Writes require a connected wallet and a valid form. Every write that
/// reaches the client is reported to subscribers as it moves through the
/// submitted, confirmed or failed phases.
pub struct Dao<C: ContractClient> {
    client: C,
    wallet: Option<Address>,
    confirmation_timeout: Duration,
    subscriptions: DaoSubscriptions,
}

impl<C> Dao<C>
where
    C: ContractClient,
{
    pub async fn new(config: DaoConfig) -> Result<Self, C::Error> {
        let client = C::connect(config.contract_address).await?;

        log::info!(target: "conclave", "📜 Connected to contract {}", client.contract());

        Ok(Self {
            client,
            wallet: None,
            confirmation_timeout: config.confirmation_timeout,
            subscriptions: Default::default(),
        })
    }

    pub async fn subscribe(&self) -> DaoEventRx {
        let (tx, rx) = unbounded_channel();
        self.subscriptions.lock().await.push(tx);

        rx
    }

    pub fn connect_wallet(&mut self, address: Address) {
        log::info!(target: "conclave", "🔑 wallet connected: {address}");
        self.wallet = Some(address);
    }

    pub fn disconnect_wallet(&mut self) {
        if let Some(address) = self.wallet.take() {
            log::info!(target: "conclave", "wallet disconnected: {address}");
        }
    }

    pub fn wallet(&self) -> Option<&Address> {
        self.wallet.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }

    pub async fn join_dao(&self, form: JoinForm) -> DaoResult<MemberId> {
        self.ensure_connected()?;
        let receipt = self.submit(form.into_call()?).await?;
        let member_id = Self::returned_id(&receipt)?;

        log::info!(target: "conclave", "🎉 joined the DAO as member {member_id}");

        Ok(member_id)
    }

    pub async fn create_proposal(&self, form: ProposalForm) -> DaoResult<ProposalId> {
        self.ensure_connected()?;
        let receipt = self.submit(form.into_call()?).await?;

        Self::returned_id(&receipt)
    }

    pub async fn cast_vote(
        &self,
        proposal_id: ProposalId,
        member_id: MemberId,
        is_for: bool,
    ) -> DaoResult<VoteId> {
        self.ensure_connected()?;
        let receipt = self
            .submit(ContractCall::CastVote {
                proposal_id,
                member_id,
                is_for,
            })
            .await?;

        Self::returned_id(&receipt)
    }

    pub async fn execute_proposal(&self, proposal_id: ProposalId) -> DaoResult<()> {
        self.ensure_connected()?;
        self.submit(ContractCall::ExecuteProposal { proposal_id })
            .await?;

        Ok(())
    }

    pub async fn create_treasury_transaction(&self, form: TreasuryForm) -> DaoResult<TransactionId> {
        self.ensure_connected()?;
        let receipt = self.submit(form.into_call()?).await?;

        Self::returned_id(&receipt)
    }

    pub async fn member_info(&self, id: MemberId) -> DaoResult<Option<MemberInfo>> {
        self.client.member_info(id).await.map_err(DaoError::client)
    }

    pub async fn proposal_info(&self, id: ProposalId) -> DaoResult<Option<ProposalInfo>> {
        self.client.proposal_info(id).await.map_err(DaoError::client)
    }

    pub async fn treasury_transaction_info(
        &self,
        id: TransactionId,
    ) -> DaoResult<Option<TreasuryTransactionInfo>> {
        self.client
            .treasury_transaction_info(id)
            .await
            .map_err(DaoError::client)
    }

    fn ensure_connected(&self) -> DaoResult<()> {
        if self.wallet.is_none() {
            return Err(DaoError::Rejected);
        }

        Ok(())
    }

    fn returned_id(receipt: &Receipt) -> DaoResult<u64> {
        receipt.output.ok_or_else(|| Self::missing_id(&receipt.tx))
    }

    fn missing_id(tx: &TxHash) -> DaoError {
        DaoError::Client(format!("transaction {tx} returned no id"))
    }

    async fn submit(&self, call: ContractCall) -> DaoResult<Receipt> {
        let name = call.name();
        let expects_id = call.returns_id();

        let tx = match self.client.send(&call).await {
            Ok(tx) => tx,
            Err(e) => {
                log::error!(target: "conclave", "❗️ failed to submit {name}: {e}");
                self.notify(&Event::Failed {
                    call: name,
                    tx: None,
                    reason: e.to_string(),
                })
                .await;

                return Err(DaoError::client(e));
            }
        };

        log::debug!(target: "conclave", "{name} submitted as {tx}");
        self.notify(&Event::Submitted {
            call: name,
            tx: tx.clone(),
        })
        .await;

        let result = tokio::select! {
            res = self.client.confirm(&tx) => match res {
                Ok(receipt) if receipt.status != TxStatus::Success => {
                    Err(DaoError::Reverted(tx.to_string()))
                }
                // the caller needs the id, a receipt without one is not a confirmation
                Ok(receipt) if expects_id && receipt.output.is_none() => Err(Self::missing_id(&tx)),
                Ok(receipt) => Ok(receipt),
                Err(e) => Err(DaoError::client(e)),
            },
            _ = tokio::time::sleep(self.confirmation_timeout) => {
                Err(DaoError::ConfirmationTimeout(tx.to_string()))
            }
        };

        match &result {
            Ok(receipt) => {
                log::info!(target: "conclave", "✅ {name} confirmed in block {}", receipt.block);
                self.notify(&Event::Confirmed {
                    call: name,
                    receipt: receipt.clone(),
                })
                .await;
            }
            Err(e) => {
                log::error!(target: "conclave", "❗️ {name} failed: {e}");
                self.notify(&Event::Failed {
                    call: name,
                    tx: Some(tx),
                    reason: e.to_string(),
                })
                .await;
            }
        }

        result
    }

    async fn notify(&self, event: &Event) {
        self.subscriptions.lock().await.retain(|tx| {
            if let Err(e) = tx.send(event.clone()) {
                log::error!(target: "conclave", "❗️ Closed subscription channel: {}", e);
                false
            } else {
                true
            }
        });
    }
}
