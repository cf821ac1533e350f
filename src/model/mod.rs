mod boosted_trees;
mod model_kind;
mod model_trait;
mod neural_net;
mod registry;

pub use boosted_trees::BoostedTreeModel;
pub use model_kind::ModelKind;
pub use model_trait::{ClassProbabilities, ProbabilityModel};
pub use neural_net::NeuralNetModel;
pub use registry::{ModelPair, ModelRegistry};
