use std::path::{Path, PathBuf};

/// Result document with two comparators, a model missing fold "1" and a
/// model without a summary.
pub const FINAL_REPORT: &str = r#"{
    "baseline_vs_attention": {
        "clean_audio": {
            "cnn_baseline": {
                "summary": {
                    "train_loss_history": [0.9, 0.5, 0.2],
                    "val_loss_history": [1.1, 0.7, 0.35],
                    "train_acc_history": [0.55, 0.78, 0.91],
                    "val_acc_history": [0.5, 0.7, 0.86],
                    "best_epoch": 3
                },
                "folds": {
                    "1": {
                        "classification_report": {
                            "loss_report": {
                                "speech": {"precision": 0.91, "recall": 0.88, "f1-score": 0.8947, "support": 120},
                                "music": {"precision": 0.84, "recall": 0.9, "f1-score": 0.869, "support": 80},
                                "noise": {"recall": 0.4, "support": 12},
                                "accuracy": 0.87
                            }
                        }
                    }
                }
            },
            "cnn_attention": {
                "summary": {
                    "train_loss_history": [0.8, 0.3],
                    "val_loss_history": [0.9, 0.45]
                },
                "folds": {"2": {}}
            }
        },
        "noisy_audio": {
            "cnn_baseline": {"folds": {}}
        }
    },
    "ablation": {
        "no_augment": {
            "mlp": {"summary": {"train_loss_history": []}}
        }
    }
}"#;

pub fn write_final_report(dir: &Path) -> PathBuf {
    let path = dir.join("final_report.json");
    std::fs::write(&path, FINAL_REPORT).expect("write final report");
    path
}
