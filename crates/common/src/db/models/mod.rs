//! SeaORM entity models

mod literature;

pub use literature::{
    Entity as LiteratureEntity,
    Model as Literature,
    ActiveModel as LiteratureActiveModel,
    Column as LiteratureColumn,
    GenerationStatus,
};
