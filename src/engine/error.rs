use thiserror::Error;

use crate::ranking::RankingError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no index built yet: call index() before search()")]
    NotIndexed,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ranking(#[from] RankingError),
}
