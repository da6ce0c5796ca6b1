//! End-to-end tests: CSV text → index → centroid model → report.

use classifier::{NearestCentroidClassifier, VisitMode};
use data_loader::TravelIndex;
use data_loader::parser::parse_interactions_str;
use engine::{EngineConfig, RankingPath, RecommendationEngine, UserReport};
use std::collections::HashSet;
use std::sync::Arc;

const DATA: &str = "\
UserId,AttractionId,AttractionType,Rating,VisitYear,VisitMonth,attraction_popularity,attr_avg_rating,user_total_visits,user_avg_rating
1,1,Beaches,5,2022,7,120,4.5,2,3.5
1,2,Museums,2,2022,8,40,3.0,2,3.5
2,1,Beaches,4,2021,6,120,4.5,2,4.5
2,3,Parks,5,2021,7,80,4.2,2,4.5
3,4,Zoos,3,2020,3,60,3.9,1,3.0
";

/// Class 1 (Couples) sits on user 1's mean features; class 4 (Solo) on user 3's
const MODEL: &str = r#"{
  "centroids": [
    { "class": 1, "values": [2022.0, 7.5, 80.0, 3.75, 2.0, 3.5] },
    { "class": 4, "values": [2020.0, 3.0, 60.0, 3.9, 1.0, 3.0] }
  ]
}"#;

fn build_engine(config: EngineConfig) -> RecommendationEngine {
    let index: TravelIndex = parse_interactions_str(DATA).unwrap().into_iter().collect();
    let model = NearestCentroidClassifier::from_json_str(MODEL).unwrap();
    RecommendationEngine::new(Arc::new(index), Arc::new(model), config).unwrap()
}

#[test]
fn test_two_user_example() {
    let engine = build_engine(EngineConfig::default());

    match engine.recommend_for_user(1).unwrap() {
        UserReport::Ready {
            prediction,
            recommendations,
            history,
            ..
        } => {
            assert_eq!(prediction.mode, VisitMode::Couples);
            assert_eq!(recommendations.path, RankingPath::Collaborative);
            assert_eq!(recommendations.len(), 1);

            let top = &recommendations.items[0];
            assert_eq!(top.attraction_id, 3);
            assert_eq!(top.category, "Parks");
            assert_eq!(top.rating, 5.0);
            assert_eq!(top.boost, 1);

            assert_eq!(history.len(), 2);
        }
        other => panic!("expected a ready report, got {other:?}"),
    }
}

#[test]
fn test_user_without_likes_falls_back() {
    let engine = build_engine(EngineConfig::default());

    match engine.recommend_for_user(3).unwrap() {
        UserReport::Ready {
            prediction,
            recommendations,
            ..
        } => {
            assert_eq!(prediction.mode, VisitMode::Solo);
            assert_eq!(recommendations.path, RankingPath::Fallback);
            // Solo prefers Museums, the only one in the data is attraction 2
            let ids: Vec<_> = recommendations.items.iter().map(|r| r.attraction_id).collect();
            assert_eq!(ids, vec![2]);
        }
        other => panic!("expected a ready report, got {other:?}"),
    }
}

#[test]
fn test_unknown_user_reports_no_data() {
    let engine = build_engine(EngineConfig::default());
    assert_eq!(
        engine.recommend_for_user(404).unwrap(),
        UserReport::NoData { user_id: 404 }
    );
}

#[test]
fn test_every_user_gets_clean_results() {
    let config = EngineConfig::from_toml_str("result_limit = 2\n").unwrap();
    let engine = build_engine(config);

    for &user_id in engine.data_index().user_ids() {
        let profile = engine.user_profile(user_id);
        if let UserReport::Ready {
            recommendations, ..
        } = engine.recommend_for_user(user_id).unwrap()
        {
            assert!(recommendations.len() <= 2);
            let mut seen = HashSet::new();
            for item in &recommendations.items {
                assert!(seen.insert(item.attraction_id));
                assert!(!profile.has_visited(item.attraction_id));
            }
        }
    }
}

#[test]
fn test_report_serializes_to_json() {
    let engine = build_engine(EngineConfig::default());

    let ready = serde_json::to_value(engine.recommend_for_user(1).unwrap()).unwrap();
    assert_eq!(ready["status"], "ready");
    assert_eq!(ready["prediction"]["mode"], "Couples");
    assert_eq!(ready["recommendations"]["path"], "collaborative");
    assert_eq!(ready["recommendations"]["items"][0]["attraction_id"], 3);

    let empty = serde_json::to_value(engine.recommend_for_user(404).unwrap()).unwrap();
    assert_eq!(empty["status"], "no_data");
    assert_eq!(empty["user_id"], 404);
}
