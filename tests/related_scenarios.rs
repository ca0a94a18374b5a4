use std::collections::HashSet;
use std::io::Write;

use tempfile::NamedTempFile;

use vinculo::classifier::{SimilarityTier, label, tier};
use vinculo::corpus::Corpus;
use vinculo::document::{Resolution, ResolutionMetadata};
use vinculo::error::Result;
use vinculo::lexical::LexicalIndex;
use vinculo::mmr::{MmrConfig, select_related};
use vinculo::similarity::cosine_similarity;

/// A small corpus with two near-duplicate groups and some stragglers.
fn sample_export() -> String {
    let records = [
        ("p-1", "Protección de datos en planillas", "Publicación de salarios de funcionarios.", Some(vec![1.0, 0.0, 0.0, 0.0])),
        ("p-2", "Protección de datos en planillas II", "Publicación de salarios, reiteración.", Some(vec![0.98, 0.05, 0.0, 0.0])),
        ("p-3", "Datos crediticios", "Rectificación de historial crediticio.", Some(vec![0.97, 0.0, 0.1, 0.0])),
        ("c-1", "Videovigilancia laboral", "Cámaras en el lugar de trabajo.", Some(vec![0.7, 0.0, 0.0, 0.7])),
        ("c-2", "Videovigilancia en condominios", "Cámaras en zonas comunes.", Some(vec![0.68, 0.0, 0.05, 0.72])),
        ("x-1", "Derecho al olvido", "Supresión de noticias antiguas.", Some(vec![0.0, 1.0, 0.0, 0.0])),
        ("x-2", "Sin embedding", "Documento sin vector.", None),
        ("x-3", "Dimensión distinta", "Vector de otra dimensión.", Some(vec![1.0, 0.0])),
    ];

    let datos: Vec<serde_json::Value> = records
        .into_iter()
        .map(|(id, titulo, texto, vector)| {
            serde_json::json!({
                "id": id,
                "titulo": titulo,
                "texto": texto,
                "metadatos": { "expediente": format!("EXP-{id}"), "fecha": "2020-01-31" },
                "vector": vector,
            })
        })
        .collect();

    serde_json::json!({ "datos": datos }).to_string()
}

#[test]
fn related_set_honors_selection_guarantees() -> Result<()> {
    let corpus = Corpus::from_json_str(&sample_export())?;
    let config = MmrConfig::default().with_top_n(4).with_threshold(0.5);

    for target in corpus.iter() {
        let related = corpus.related(&target.id, &config);
        assert!(related.len() <= config.top_n);

        let unique: HashSet<&str> = related.iter().map(|r| r.item.id.as_str()).collect();
        assert_eq!(unique.len(), related.len());
        assert!(!unique.contains(target.id.as_str()));

        for scored in &related {
            assert!(scored.similarity >= config.threshold);
            assert!(scored.item.vector.is_some());
            assert_ne!(scored.item.id, "x-3");
        }
    }
    Ok(())
}

#[test]
fn diversity_pulls_in_a_different_topic() -> Result<()> {
    let corpus = Corpus::from_json_str(&sample_export())?;

    // Pure relevance: the near-duplicates of p-1 come first.
    let relevance = MmrConfig::default()
        .with_top_n(2)
        .with_diversity_factor(1.0)
        .with_threshold(0.5);
    let related = corpus.related("p-1", &relevance);
    let ids: Vec<&str> = related.iter().map(|r| r.item.id.as_str()).collect();
    assert_eq!(ids, ["p-2", "p-3"]);
    assert!(related[0].similarity >= related[1].similarity);

    // Strong diversity: after the best match, the camera group wins over
    // the remaining near-duplicate.
    let diverse = relevance.with_diversity_factor(0.2);
    let related = corpus.related("p-1", &diverse);
    let ids: Vec<&str> = related.iter().map(|r| r.item.id.as_str()).collect();
    assert_eq!(ids[0], "p-2");
    assert!(ids[1].starts_with("c-"), "{ids:?}");
    Ok(())
}

#[test]
fn threshold_limits_the_related_set() -> Result<()> {
    let corpus = Corpus::from_json_str(&sample_export())?;
    let strict = MmrConfig::default().with_top_n(10).with_threshold(0.95);

    let related = corpus.related("p-1", &strict);
    let ids: HashSet<&str> = related.iter().map(|r| r.item.id.as_str()).collect();
    assert_eq!(ids, HashSet::from(["p-2", "p-3"]));
    Ok(())
}

#[test]
fn search_then_related_pipeline() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(sample_export().as_bytes())?;

    let corpus = Corpus::load(file.path())?;
    assert_eq!(corpus.len(), 8);

    let index = corpus.forward_index();
    assert_eq!(index.search("videovig", 10), ["c-1", "c-2"]);

    let hits = corpus.search(&index, "camaras", 10);
    let hit_ids: Vec<&str> = hits.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(hit_ids, ["c-1", "c-2"]);

    let config = MmrConfig::default().with_top_n(1).with_threshold(0.9);
    let related = corpus.related_for(&hit_ids, &config);
    assert_eq!(related[0][0].item.id, "c-2");
    assert_eq!(related[1][0].item.id, "c-1");
    assert_eq!(tier(related[0][0].similarity), SimilarityTier::High);
    assert_eq!(label(related[0][0].similarity).as_str(), "Muy alta");
    Ok(())
}

#[test]
fn selector_works_over_borrowed_records() {
    let owned = vec![
        Resolution::new("a", "A", "").with_vector(vec![0.0, 1.0]),
        Resolution::new("b", "B", "").with_vector(vec![1.0, 1.0]),
        Resolution::new("c", "C", "").with_metadata(ResolutionMetadata::default()),
    ];
    let borrowed: Vec<&Resolution> = owned.iter().collect();
    let target = [1.0_f32, 0.0];
    let config = MmrConfig::default().with_threshold(0.0);

    let from_owned = select_related(Some(&target[..]), &owned, &config);
    let from_borrowed = select_related(Some(&target[..]), &borrowed, &config);
    assert_eq!(from_owned.len(), 2);
    assert_eq!(from_owned[0].item.id, "b");
    assert_eq!(from_borrowed[0].item.id, "b");
    assert_eq!(
        from_owned[0].similarity,
        cosine_similarity(&target, &[1.0, 1.0])
    );
}
