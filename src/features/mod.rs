mod feature_assembler;

pub use feature_assembler::{l2_normalize, FeatureAssembler, FeatureBatch, FeatureVector};
