use std::collections::BTreeMap;
use std::path::Path;

use super::classification::read_classification_from_file;
use super::directory::{Corpus, Emails};
use super::TRUTH_FILENAME;
use crate::bayes::Label;
use crate::error::Result;

/// Corpus with known labels, read from its `!truth.txt`
#[derive(Debug, Clone)]
pub struct TrainingCorpus {
    corpus: Corpus,
    truth: BTreeMap<String, String>,
}

impl TrainingCorpus {
    pub fn new<P: AsRef<Path>>(src: P) -> Result<Self> {
        let corpus = Corpus::new(src)?;
        let truth = read_classification_from_file(corpus.path().join(TRUTH_FILENAME))?;
        Ok(Self { corpus, truth })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// True label of an email, `None` when unknown or not a valid tag
    pub fn get_class(&self, name: &str) -> Option<Label> {
        self.truth.get(name).and_then(|tag| tag.parse().ok())
    }

    pub fn is_ham(&self, name: &str) -> bool {
        self.get_class(name) == Some(Label::Ham)
    }

    pub fn is_spam(&self, name: &str) -> bool {
        self.get_class(name) == Some(Label::Spam)
    }

    pub fn hams(&self) -> Result<LabeledEmails<'_>> {
        self.labeled(Label::Ham)
    }

    pub fn spams(&self) -> Result<LabeledEmails<'_>> {
        self.labeled(Label::Spam)
    }

    fn labeled(&self, label: Label) -> Result<LabeledEmails<'_>> {
        Ok(LabeledEmails {
            corpus: self,
            label,
            emails: self.corpus.emails()?,
        })
    }
}

/// Emails of one class; unreadable files surface as errors
pub struct LabeledEmails<'a> {
    corpus: &'a TrainingCorpus,
    label: Label,
    emails: Emails,
}

impl Iterator for LabeledEmails<'_> {
    type Item = Result<(String, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.emails.next()? {
                Ok((name, body)) => {
                    if self.corpus.get_class(&name) == Some(self.label) {
                        return Some(Ok((name, body)));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
