// retailflow-core/src/ports/source.rs

// What the pipeline needs from the outside world on the input side: a way to
// obtain one raw table per entity. Where the bytes come from is not its concern.

use crate::domain::model::{Entity, RawTable};
use crate::error::RetailflowError;

pub trait TableSource {
    fn extract(&self, entity: Entity) -> Result<RawTable, RetailflowError>;
}
