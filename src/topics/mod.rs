// Topic modeling: term vectorization, topic fit, dominant-topic assignment.

pub mod dominant;
pub mod keywords;
pub mod nmf;
pub mod traits;
pub mod vectorizer;
