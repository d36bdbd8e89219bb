//! Integration tests for training, persisting and evaluating filters

use spam_rs::config::{Config, FilterConfig};
use spam_rs::corpus::{read_classification_from_file, Corpus, TrainingCorpus, PREDICTION_FILENAME, TRUTH_FILENAME};
use spam_rs::filters::{run_test, BayesFilter, NaiveFilter, ParanoidFilter, RandomFilter, SpamFilter};
use spam_rs::quality::{compute_quality_for_corpus, compute_quality_for_filter, compute_quality_for_filters};
use spam_rs::Label;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MULTIPART_SPAM: &str = "From: promo@example.com\r\n\
Subject: You won\r\n\
MIME-Version: 1.0\r\n\
Content-Type: multipart/alternative; boundary=\"sep\"\r\n\
\r\n\
--sep\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
Content-Transfer-Encoding: base64\r\n\
\r\n\
ZnJlZSBjYXNpbm8gcHJpemUgbG90dGVyeSB3aW5uZXIgamFja3BvdA==\r\n\
--sep\r\n\
Content-Type: text/html; charset=utf-8\r\n\
\r\n\
<p>free casino prize</p>\r\n\
--sep--\r\n";

const QUOTED_PRINTABLE_HAM: &str = "From: alice@example.com\n\
Subject: Q3\n\
Content-Type: text/plain; charset=utf-8\n\
Content-Transfer-Encoding: quoted-printable\n\
\n\
Quarterly report=\n review for the project team, agenda attach=\ned\n";

const ATTACHMENT_SPAM: &str = "Subject: offer\n\
Content-Type: multipart/mixed; boundary=\"b1\"\n\
\n\
--b1\n\
Content-Type: text/plain\n\
Content-Disposition: attachment; filename=\"notes.txt\"\n\
\n\
project budget meeting agenda team\n\
--b1\n\
Content-Type: text/plain\n\
Content-Transfer-Encoding: quoted-printable\n\
\n\
Casino bonus offer=2C click now\n\
--b1--\n";

/// Helper to write emails and their truth file into a directory
fn write_corpus(dir: &Path, emails: &[(&str, Label, &str)]) {
    let mut truth = String::new();
    for (name, label, raw) in emails {
        fs::write(dir.join(name), raw).unwrap();
        truth.push_str(&format!("{} {}\n", name, label));
    }
    fs::write(dir.join(TRUTH_FILENAME), truth).unwrap();
}

fn setup_train_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[
            ("h1", Label::Ham, "Subject: status\n\nProject budget meeting on monday with the team"),
            ("h2", Label::Ham, QUOTED_PRINTABLE_HAM),
            ("h3", Label::Ham, "Subject: planning\n\nSchedule the budget review meeting and agenda"),
            ("s1", Label::Spam, MULTIPART_SPAM),
            ("s2", Label::Spam, "Subject: cash\n\nClaim free cash bonus now, click here!"),
            (
                "s3",
                Label::Spam,
                "Content-Type: text/html\n\n<html><b>Jackpot</b> offer: free casino bonus, click http://win.example</html>",
            ),
        ],
    );
    dir
}

fn setup_test_corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_corpus(
        dir.path(),
        &[
            ("t1", Label::Ham, "Subject: sync\n\nTeam meeting agenda for the quarterly budget"),
            ("t2", Label::Ham, "Subject: plan\n\nProject review schedule for monday"),
            ("t3", Label::Spam, "Subject: winner\n\nFree lottery prize, claim your cash jackpot"),
            ("t4", Label::Spam, ATTACHMENT_SPAM),
        ],
    );
    dir
}

#[test]
fn test_train_save_load_and_test() {
    let train = setup_train_corpus();
    let test = setup_test_corpus();
    let model_dir = TempDir::new().unwrap();
    let config = FilterConfig {
        model_location: Some(model_dir.path().join("model").join("nb.json")),
        ..Default::default()
    };

    let mut trainer = BayesFilter::new(&config);
    trainer.train(&TrainingCorpus::new(train.path()).unwrap()).unwrap();
    trainer.save_model().unwrap();
    assert!(model_dir.path().join("model").join("nb.json").exists());

    // A fresh filter picks the saved model up on first prediction
    let mut filter = BayesFilter::new(&config);
    let predictions = run_test(&mut filter, test.path()).unwrap();

    assert_eq!(predictions.len(), 4);
    assert_eq!(predictions["t1"], Label::Ham);
    assert_eq!(predictions["t2"], Label::Ham);
    assert_eq!(predictions["t3"], Label::Spam);
    assert_eq!(predictions["t4"], Label::Spam);

    let written = read_classification_from_file(test.path().join(PREDICTION_FILENAME)).unwrap();
    assert_eq!(written["t1"], "OK");
    assert_eq!(written["t4"], "SPAM");

    let quality = compute_quality_for_corpus(test.path()).unwrap();
    assert_eq!(quality, 1.0);
}

#[test]
fn test_mime_bodies_feed_the_model() {
    let train = setup_train_corpus();
    let mut filter = BayesFilter::new(&FilterConfig::default());
    filter.train(&TrainingCorpus::new(train.path()).unwrap()).unwrap();

    let model = filter.model().unwrap();
    // Decoded from base64
    assert!(model.contains("lottery"));
    assert!(model.contains("winner"));
    // Soft line breaks joined the quoted-printable words
    assert!(model.contains("attach"));
    assert!(!model.contains("attach="));
    // Headers never reach the tokenizer
    assert!(!model.contains("promo"));
    assert!(!model.contains("subject"));
    // URLs become placeholders
    assert!(model.contains("httpaddr"));
}

#[test]
fn test_bayes_beats_baselines() {
    let train = setup_train_corpus();
    let test = setup_test_corpus();

    let mut filters: Vec<Box<dyn SpamFilter>> = vec![
        Box::new(NaiveFilter),
        Box::new(ParanoidFilter),
        Box::new(RandomFilter::with_seed(7)),
        Box::new(BayesFilter::new(&FilterConfig::default())),
    ];

    let qualities = compute_quality_for_filters(train.path(), test.path(), &mut filters).unwrap();

    assert_eq!(qualities.len(), 4);
    assert_eq!(qualities["BayesFilter"], 1.0);
    // tn 2, fn 2
    assert!((qualities["NaiveFilter"] - 0.5).abs() < 1e-12);
    // tp 2, fp 2
    assert!((qualities["ParanoidFilter"] - 2.0 / 22.0).abs() < 1e-12);
    for (name, quality) in &qualities {
        assert!(*quality <= qualities["BayesFilter"], "{} scored above bayes", name);
    }

    assert!(!test.path().join(PREDICTION_FILENAME).exists());
}

#[test]
fn test_random_filter_is_reproducible() {
    let train = setup_train_corpus();
    let test = setup_test_corpus();

    let first =
        compute_quality_for_filter(train.path(), test.path(), &mut RandomFilter::with_seed(42)).unwrap();
    let second =
        compute_quality_for_filter(train.path(), test.path(), &mut RandomFilter::with_seed(42)).unwrap();

    assert_eq!(first, second);
    assert!((0.0..=1.0).contains(&first));
}

#[test]
fn test_extend_saved_model() {
    let train = setup_train_corpus();
    let model_dir = TempDir::new().unwrap();
    let config = FilterConfig {
        model_location: Some(model_dir.path().join("nb.json")),
        ..Default::default()
    };

    let mut filter = BayesFilter::new(&config);
    filter.train(&TrainingCorpus::new(train.path()).unwrap()).unwrap();
    filter.save_model().unwrap();

    let extra = TempDir::new().unwrap();
    write_corpus(
        extra.path(),
        &[("x1", Label::Spam, "\ncrypto wallet crypto airdrop crypto")],
    );

    let mut extended = BayesFilter::new(&config);
    extended.load_model().unwrap();
    extended.extend(&TrainingCorpus::new(extra.path()).unwrap()).unwrap();
    extended.save_model().unwrap();

    let mut reloaded = BayesFilter::new(&config);
    reloaded.load_model().unwrap();
    let model = reloaded.model().unwrap();

    assert!(model.contains("crypto"));
    assert!(model.contains("budget"));
    // Equal reconstructed email counts, plus one new spam
    assert!(model.prior(Label::Ham) < 0.5);
    assert!(model.counts().is_none());
    assert_eq!(
        reloaded.classify_email(b"\ncrypto airdrop wallet").unwrap(),
        Label::Spam
    );
    assert_eq!(
        reloaded.classify_email(b"\nbudget meeting agenda").unwrap(),
        Label::Ham
    );
}

#[test]
fn test_preserved_counts_extend_like_full_training() {
    let config = Config::from_toml(
        r#"
[filter]
max_tokens = 2500
preserve_counts = true
"#,
    )
    .unwrap();

    // Train on everything at once
    let all = setup_train_corpus();
    let mut full = BayesFilter::new(&config.filter);
    full.train(&TrainingCorpus::new(all.path()).unwrap()).unwrap();

    // Train on the hams, then extend with the spams
    let hams = TempDir::new().unwrap();
    write_corpus(
        hams.path(),
        &[
            ("h1", Label::Ham, "Subject: status\n\nProject budget meeting on monday with the team"),
            ("h2", Label::Ham, QUOTED_PRINTABLE_HAM),
            ("h3", Label::Ham, "Subject: planning\n\nSchedule the budget review meeting and agenda"),
        ],
    );
    let spams = TempDir::new().unwrap();
    write_corpus(
        spams.path(),
        &[
            ("s1", Label::Spam, MULTIPART_SPAM),
            ("s2", Label::Spam, "Subject: cash\n\nClaim free cash bonus now, click here!"),
            (
                "s3",
                Label::Spam,
                "Content-Type: text/html\n\n<html><b>Jackpot</b> offer: free casino bonus, click http://win.example</html>",
            ),
        ],
    );

    let mut staged = BayesFilter::new(&config.filter);
    staged.train(&TrainingCorpus::new(hams.path()).unwrap()).unwrap();
    staged.extend(&TrainingCorpus::new(spams.path()).unwrap()).unwrap();

    let full_model = full.model().unwrap();
    let staged_model = staged.model().unwrap();

    assert_eq!(full_model.vocabulary(), staged_model.vocabulary());
    assert_eq!(full_model.prior(Label::Spam), staged_model.prior(Label::Spam));
    assert_eq!(
        full_model.total_tokens(Label::Spam),
        staged_model.total_tokens(Label::Spam)
    );
    for token in full_model.vocabulary() {
        for label in [Label::Ham, Label::Spam] {
            let expected = full_model.probability(label, token).unwrap();
            let actual = staged_model.probability(label, token).unwrap();
            assert!((expected - actual).abs() < 1e-12, "{} differs for {}", token, label);
        }
    }

    let counts = staged_model.counts().unwrap();
    assert_eq!(counts.ham_emails, 3);
    assert_eq!(counts.spam_emails, 3);
}

#[test]
fn test_predict_skips_special_files() {
    let test = setup_test_corpus();
    fs::write(test.path().join("!notes.txt"), "not an email").unwrap();

    let corpus = Corpus::new(test.path()).unwrap();
    let names = corpus.email_names().unwrap();

    assert_eq!(names, vec!["t1", "t2", "t3", "t4"]);
}
