//! Two-stage text classification pipeline: TF-IDF features into a linear SVM

use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::pipeline::svm::{LinearSvm, SvmConfig};
use crate::pipeline::vectorizer::{TfidfVectorizer, VectorizerConfig};

/// Settings for both pipeline stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub vectorizer: VectorizerConfig,
    pub svm: SvmConfig,
}

/// Vectorizer followed by classifier. Fitting runs the stages in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPipeline {
    vectorizer: TfidfVectorizer,
    classifier: LinearSvm,
}

/// Create an untrained pipeline.
pub fn build_pipeline(config: &PipelineConfig) -> TextPipeline {
    TextPipeline {
        vectorizer: TfidfVectorizer::new(config.vectorizer.clone()),
        classifier: LinearSvm::new(config.svm.clone()),
    }
}

impl TextPipeline {
    /// Fit on clean texts and their category labels.
    pub fn fit(&mut self, texts: &[String], labels: &[String]) -> Result<()> {
        if texts.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }
        let features = self.vectorizer.fit_transform(texts)?;
        self.classifier
            .fit(&features, labels, self.vectorizer.vocabulary_size())
    }

    pub fn predict(&self, texts: &[String]) -> Result<Vec<String>> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted);
        }
        let features = self.vectorizer.transform(texts)?;
        self.classifier.predict(&features)
    }

    pub fn predict_one(&self, text: &str) -> Result<String> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted);
        }
        let features = self.vectorizer.transform_one(text);
        self.classifier.predict_one(&features).map(str::to_string)
    }

    pub fn is_fitted(&self) -> bool {
        self.vectorizer.is_fitted() && self.classifier.is_fitted()
    }

    /// Every label the pipeline can emit.
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }
}
