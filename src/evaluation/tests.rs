use super::*;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

mod rouge_tests {
    use super::*;
    use crate::evaluation::rouge::tokenize;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        assert_eq!(
            tokenize("Barang BAGUS, pengiriman cepat!"),
            vec!["barang", "bagus", "pengiriman", "cepat"]
        );
    }

    #[test]
    fn test_tokenize_drops_emoji_and_punctuation() {
        assert_eq!(tokenize("bagus!!! \u{1F60A}"), vec!["bagus"]);
        assert!(tokenize("\u{1F60A}...!!!").is_empty());
    }

    #[test]
    fn test_identical_strings_score_one() {
        let text = "produk bagus pengiriman cepat";
        let scores = calculate_rouge(text, text);
        assert_eq!(scores.rouge1.fmeasure, 1.0);
        assert_eq!(scores.rouge2.fmeasure, 1.0);
        assert_eq!(scores.rouge_l.fmeasure, 1.0);
    }

    #[test]
    fn test_identical_strings_score_one_despite_casing() {
        let scores = calculate_rouge("Produk BAGUS", "produk bagus");
        assert_eq!(scores.rouge1.fmeasure, 1.0);
    }

    #[test]
    fn test_disjoint_vocabulary_scores_zero() {
        let scores = calculate_rouge("produk bagus", "pengiriman lambat");
        assert_eq!(scores.rouge1, RougeScore::default());
        assert_eq!(scores.rouge2, RougeScore::default());
        assert_eq!(scores.rouge_l.fmeasure, 0.0);
    }

    #[test]
    fn test_empty_sides_score_zero_without_panic() {
        assert_eq!(calculate_rouge("", "reference"), RougeScores::default());
        assert_eq!(calculate_rouge("prediction", ""), RougeScores::default());
        assert_eq!(calculate_rouge("", ""), RougeScores::default());
    }

    #[test]
    fn test_rouge1_partial_overlap() {
        // prediction: [produk, bagus], reference: [barang, bagus]
        // overlap 1 -> precision 0.5, recall 0.5, f 0.5
        let scores = calculate_rouge("produk bagus", "barang bagus");
        assert!((scores.rouge1.precision - 0.5).abs() < 1e-9);
        assert!((scores.rouge1.recall - 0.5).abs() < 1e-9);
        assert!((scores.rouge1.fmeasure - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rouge1_clips_repeated_tokens() {
        // "bagus" appears once in the reference, so a prediction repeating it
        // three times only gets credit once.
        let scores = calculate_rouge("bagus bagus bagus", "bagus sekali");
        assert!((scores.rouge1.precision - 1.0 / 3.0).abs() < 1e-9);
        assert!((scores.rouge1.recall - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_rouge2_needs_shared_bigrams() {
        // Shared unigrams but no shared bigram.
        let scores = calculate_rouge("bagus produk", "produk bagus sekali");
        assert!(scores.rouge1.fmeasure > 0.0);
        assert_eq!(scores.rouge2.fmeasure, 0.0);
    }

    #[test]
    fn test_single_token_sides_have_zero_rouge2() {
        let scores = calculate_rouge("bagus", "bagus");
        assert_eq!(scores.rouge1.fmeasure, 1.0);
        assert_eq!(scores.rouge2, RougeScore::default());
        assert_eq!(scores.rouge_l.fmeasure, 1.0);
    }

    #[test]
    fn test_rouge_l_respects_order() {
        // Same bag of words, reversed order: unigram overlap is full but the
        // LCS is a single token.
        let scores = calculate_rouge("cepat bagus", "bagus cepat");
        assert_eq!(scores.rouge1.fmeasure, 1.0);
        assert!((scores.rouge_l.precision - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_scores_bounded_by_one() {
        let scores = calculate_rouge(
            "barang sesuai deskripsi pengiriman cepat",
            "barang bagus dan pengiriman sangat cepat",
        );
        for score in [scores.rouge1, scores.rouge2, scores.rouge_l] {
            assert!(score.precision <= 1.0);
            assert!(score.recall <= 1.0);
            assert!(score.fmeasure <= 1.0);
        }
    }
}

mod report_tests {
    use super::*;

    #[test]
    fn test_empty_input_is_explicit_error() {
        let err = evaluate_predictions(&[], &[]).unwrap_err();
        assert!(matches!(err, EvalError::EmptyInput));
    }

    #[test]
    fn test_length_mismatch_is_reported() {
        let err =
            evaluate_predictions(&strings(&["a", "b"]), &strings(&["a"])).unwrap_err();
        assert!(matches!(
            err,
            EvalError::LengthMismatch {
                predictions: 2,
                references: 1,
            }
        ));
    }

    #[test]
    fn test_perfect_predictions_aggregate_to_one() {
        let texts = strings(&["produk bagus sekali", "pengiriman cepat dan aman"]);
        let report = evaluate_predictions(&texts, &texts).unwrap();

        assert_eq!(report.count, 2);
        assert_eq!(report.rouge1.fmeasure, 1.0);
        assert_eq!(report.rouge_l.fmeasure, 1.0);
        assert_eq!(report.rouge1.fmeasure_std, 0.0);
    }

    #[test]
    fn test_per_example_scores_preserve_order() {
        let predictions = strings(&["produk bagus", "tidak cocok"]);
        let references = strings(&["produk bagus", "pengiriman lambat"]);
        let report = evaluate_predictions(&predictions, &references).unwrap();

        assert_eq!(report.per_example.len(), 2);
        assert_eq!(report.per_example[0].rouge1.fmeasure, 1.0);
        assert_eq!(report.per_example[1].rouge1.fmeasure, 0.0);
    }

    #[test]
    fn test_mean_and_std_over_mixed_scores() {
        let predictions = strings(&["produk bagus", "produk bagus"]);
        let references = strings(&["produk bagus", "pengiriman lambat"]);
        let report = evaluate_predictions(&predictions, &references).unwrap();

        // f-measures are 1.0 and 0.0: mean 0.5, population std 0.5.
        assert!((report.rouge1.fmeasure - 0.5).abs() < 1e-9);
        assert!((report.rouge1.fmeasure_std - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_format_contains_all_metrics() {
        let texts = strings(&["produk bagus"]);
        let report = evaluate_predictions(&texts, &texts).unwrap();
        let formatted = report.format();

        for heading in ["ROUGE1:", "ROUGE2:", "ROUGEL:"] {
            assert!(formatted.contains(heading));
        }
        assert!(formatted.contains("precision: 1.0000"));
        assert!(formatted.contains("std: 0.0000"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let texts = strings(&["produk bagus"]);
        let report = evaluate_predictions(&texts, &texts).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["count"], 1);
        assert_eq!(json["rouge1"]["fmeasure"], 1.0);
        assert!(json["per_example"].is_array());
    }
}
