//! Tests for the Query Analyzer

use super::*;

fn set(tables: &[&str]) -> BTreeSet<String> {
    tables.iter().map(|t| t.to_string()).collect()
}

mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.join_threshold, 3);
        assert_eq!(config.subquery_threshold, 2);
        assert_eq!(config.complexity_threshold, 10.0);
        assert_eq!(config.base_rows, 1000);
        assert_eq!(config.weights, ConstructWeights::default());
    }

    #[test]
    fn test_builder_methods() {
        let config = AnalyzerConfig::new()
            .with_join_threshold(1)
            .with_subquery_threshold(0)
            .with_complexity_threshold(50.0)
            .with_base_rows(10);

        assert_eq!(config.join_threshold, 1);
        assert_eq!(config.subquery_threshold, 0);
        assert_eq!(config.complexity_threshold, 50.0);
        assert_eq!(config.base_rows, 10);

        let analyzer = QueryAnalyzer::with_config(config.clone());
        assert_eq!(analyzer.config(), &config);
        assert_eq!(QueryAnalyzer::new().config(), &AnalyzerConfig::default());
    }

    #[test]
    fn test_partial_config_deserialization() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{"join_threshold": 5, "weights": {"join": 4.0}}"#).unwrap();

        assert_eq!(config.join_threshold, 5);
        assert_eq!(config.subquery_threshold, 2);
        assert_eq!(config.weights.join, 4.0);
        assert_eq!(config.weights.select, 1.0);
    }
}

mod analyze_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_statement() {
        let analysis = analyze_query("");

        assert_eq!(analysis.complexity_score, 1.0);
        assert!(analysis.tables.is_empty());
        assert!(analysis.operations.is_empty());
        assert_eq!(analysis.joins, 0);
        assert_eq!(analysis.subqueries, 0);
        assert_eq!(analysis.aggregations, 0);
        assert_eq!(analysis.estimated_rows, 1000);
        assert!(analysis.optimization_suggestions.is_empty());
    }

    #[test]
    fn test_simple_select() {
        let analysis = analyze_query("SELECT * FROM users");

        assert_eq!(analysis.tables, set(&["users"]));
        assert_eq!(analysis.joins, 0);
        assert_eq!(analysis.operations, vec![Operation::Select]);
        assert_eq!(analysis.complexity_score, 2.0);
        assert_eq!(analysis.estimated_rows, 2000);
        assert!(!analysis.has_suggestions());
    }

    #[test]
    fn test_four_joins_suggest_splitting() {
        let analysis = analyze_query(
            "SELECT * FROM a JOIN b ON a.id=b.a_id JOIN c ON b.id=c.b_id \
             JOIN d ON c.id=d.c_id JOIN e ON d.id=e.d_id",
        );

        assert_eq!(analysis.joins, 4);
        assert_eq!(analysis.tables, set(&["a", "b", "c", "d", "e"]));
        assert_eq!(analysis.operations, vec![Operation::Select, Operation::Join]);
        assert_eq!(analysis.complexity_score, 12.0);
        assert_eq!(analysis.estimated_rows, 12000);
        assert_eq!(
            analysis.optimization_suggestions,
            vec![
                SuggestionKind::SplitJoins.message(),
                SuggestionKind::IndexKeyColumns.message(),
            ]
        );
    }

    #[test]
    fn test_three_joins_do_not_trigger_split() {
        let analysis =
            analyze_query("SELECT * FROM a JOIN b ON 1=1 JOIN c ON 1=1 JOIN d ON 1=1");

        assert_eq!(analysis.joins, 3);
        assert!(
            !analysis
                .optimization_suggestions
                .contains(&SuggestionKind::SplitJoins.message().to_string())
        );
    }

    #[test]
    fn test_aggregate_without_group_by() {
        let analysis = analyze_query("SELECT COUNT(*) FROM orders");

        assert_eq!(analysis.aggregations, 1);
        assert!(!analysis.has_operation(Operation::GroupBy));
        assert_eq!(analysis.complexity_score, 4.2);
        assert_eq!(analysis.estimated_rows, 4200);
        assert_eq!(
            analysis.optimization_suggestions,
            vec![SuggestionKind::AddGroupBy.message()]
        );
    }

    #[test]
    fn test_grouped_aggregate() {
        let analysis = analyze_query(
            "SELECT dept, COUNT(*) FROM emp WHERE age > 30 GROUP BY dept ORDER BY dept",
        );

        assert_eq!(
            analysis.operations,
            vec![
                Operation::Select,
                Operation::Where,
                Operation::GroupBy,
                Operation::OrderBy
            ]
        );
        assert_eq!(analysis.complexity_score, 8.9);
        assert_eq!(analysis.tables, set(&["emp"]));
        assert!(analysis.optimization_suggestions.is_empty());
    }

    #[test]
    fn test_having_detected() {
        let analysis = analyze_query(
            "SELECT dept FROM emp GROUP BY dept HAVING COUNT(*) > 1",
        );

        assert!(analysis.has_operation(Operation::Having));
        assert!(analysis.has_operation(Operation::GroupBy));
        assert!(analysis.optimization_suggestions.is_empty());
    }

    #[test]
    fn test_nested_subqueries() {
        let analysis = analyze_query(
            "SELECT * FROM t WHERE a IN (SELECT a FROM x) \
             AND b IN (SELECT b FROM y) AND c IN (SELECT c FROM z)",
        );

        assert_eq!(analysis.subqueries, 3);
        assert_eq!(analysis.complexity_score, 15.2);
        assert_eq!(analysis.tables, set(&["t"]));
        assert_eq!(
            analysis.optimization_suggestions,
            vec![
                SuggestionKind::ReplaceSubqueries.message(),
                SuggestionKind::IndexKeyColumns.message(),
            ]
        );
    }

    #[test]
    fn test_case_insensitive_tables() {
        let analysis = analyze_query("select * FROM Users INNER JOIN Orders ON 1=1");
        assert_eq!(analysis.tables, set(&["orders", "users"]));
    }

    #[test]
    fn test_duplicate_tables_collapse() {
        let analysis = analyze_query("SELECT * FROM users JOIN users ON 1=1");
        assert_eq!(analysis.tables, set(&["users"]));
        assert_eq!(analysis.joins, 1);
    }

    #[test]
    fn test_table_extraction_limitations() {
        // Qualified names keep their first segment, comma joins are not followed
        let analysis = analyze_query("SELECT * FROM public.users u, orders o");
        assert_eq!(analysis.tables, set(&["public"]));
    }

    #[test]
    fn test_operations_are_substring_based() {
        // "joins" contains "join" but is not a JOIN keyword on its own
        let analysis = analyze_query("SELECT joins FROM stats");

        assert!(analysis.has_operation(Operation::Join));
        assert_eq!(analysis.joins, 0);
        assert_eq!(analysis.tables, set(&["stats"]));
    }

    #[test]
    fn test_malformed_sql_does_not_fail() {
        let inputs = [
            "((((",
            "FROM",
            "JOIN JOIN JOIN",
            "select from where group by order by having",
            "\u{0}\u{1}drop",
            "ßelect ünicode FROM tæble",
        ];

        for sql in inputs {
            let analysis = analyze_query(sql);
            assert!(analysis.complexity_score >= 1.0, "{sql}");
        }
    }

    #[test]
    fn test_idempotent() {
        let sql = "SELECT a, SUM(b) FROM t JOIN u ON t.id = u.t_id GROUP BY a";
        assert_eq!(analyze_query(sql), analyze_query(sql));
    }
}

mod custom_config_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_custom_thresholds() {
        let analyzer = QueryAnalyzer::with_config(
            AnalyzerConfig::new()
                .with_join_threshold(0)
                .with_complexity_threshold(100.0),
        );

        let analysis = analyzer.analyze("SELECT * FROM a JOIN b ON a.id = b.id");
        assert_eq!(
            analysis.optimization_suggestions,
            vec![SuggestionKind::SplitJoins.message()]
        );
    }

    #[test]
    fn test_custom_weights_and_rows() {
        let weights = ConstructWeights::default()
            .with_weight(Construct::Select, 0.0)
            .with_weight(Construct::Join, 1.0);
        let analyzer = QueryAnalyzer::with_config(
            AnalyzerConfig::new().with_weights(weights).with_base_rows(10),
        );

        let analysis = analyzer.analyze("SELECT * FROM a JOIN b ON 1=1");
        assert_eq!(analysis.complexity_score, 2.0);
        assert_eq!(analysis.estimated_rows, 20);
    }

    #[test]
    fn test_negative_configured_weight_keeps_baseline() {
        let mut config = AnalyzerConfig::default();
        config.weights.select = -10.0;

        let analyzer = QueryAnalyzer::with_config(config);
        assert_eq!(analyzer.analyze("SELECT 1").complexity_score, 1.0);
    }

    #[test]
    fn test_suggestions_on_handmade_analysis() {
        let analyzer = QueryAnalyzer::new();
        let analysis = QueryAnalysis {
            complexity_score: 10.01,
            joins: 4,
            subqueries: 3,
            aggregations: 2,
            operations: vec![Operation::Select],
            ..Default::default()
        };

        assert_eq!(
            analyzer.suggestions(&analysis),
            vec![
                SuggestionKind::SplitJoins,
                SuggestionKind::ReplaceSubqueries,
                SuggestionKind::IndexKeyColumns,
                SuggestionKind::AddGroupBy,
            ]
        );
    }
}
