use std::collections::BTreeMap;

use crate::domain::analysis::{AnalysisResult, ColorAnalysis};

// Canned analysis shown in demo mode; no backend call is involved.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSample {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
    pub result: AnalysisResult,
}

pub fn demo_samples() -> Vec<DemoSample> {
    vec![
        sample(
            "demo-1",
            "Oval Face - Female",
            "Professional woman with clear skin",
            "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400&h=400&fit=crop",
            Profile {
                face_shape: "Oval",
                confidence: 0.94,
                gender: "Female",
                scores: [0.15, 0.22, 0.18, 0.85],
                dominant_color: [220, 180, 165],
                undertone: "warm",
                season: "Spring",
            },
            [
                "**Hairstyle:** Long layers will enhance your natural balance and complement your oval face shape perfectly.",
                "**Skincare:** Focus on hydration with hyaluronic acid serums to maintain your healthy glow.",
                "**Makeup:** Warm-toned bronzers and peachy blushes will complement your spring complexion beautifully.",
            ],
        ),
        sample(
            "demo-2",
            "Round Face - Female",
            "Young woman with vibrant skin",
            "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&h=400&fit=crop",
            Profile {
                face_shape: "Round",
                confidence: 0.91,
                gender: "Female",
                scores: [0.25, 0.12, 0.20, 0.82],
                dominant_color: [235, 195, 180],
                undertone: "cool",
                season: "Summer",
            },
            [
                "**Hairstyle:** Side-swept bangs and angular cuts will add definition to your round face beautifully.",
                "**Skincare:** Incorporate salicylic acid to target minor breakouts and maintain clear, healthy skin.",
                "**Makeup:** Cool-toned contour along cheekbones will create beautiful definition and structure.",
            ],
        ),
        sample(
            "demo-3",
            "Square Face - Male",
            "Professional man with strong features",
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=400&h=400&fit=crop",
            Profile {
                face_shape: "Square",
                confidence: 0.93,
                gender: "Male",
                scores: [0.10, 0.15, 0.30, 0.80],
                dominant_color: [210, 170, 155],
                undertone: "neutral",
                season: "Autumn",
            },
            [
                "**Hairstyle:** A textured crop or side part will complement your strong jawline perfectly.",
                "**Grooming:** Combat dryness with a rich moisturizer and weekly exfoliation for smooth skin.",
                "**Style:** Autumn colors like olive, burgundy, and camel will enhance your natural tones.",
            ],
        ),
        sample(
            "demo-4",
            "Heart Face - Female",
            "Elegant woman with delicate features",
            "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=400&h=400&fit=crop",
            Profile {
                face_shape: "Heart",
                confidence: 0.89,
                gender: "Female",
                scores: [0.08, 0.18, 0.15, 0.88],
                dominant_color: [240, 205, 195],
                undertone: "cool",
                season: "Winter",
            },
            [
                "**Hairstyle:** A chin-length bob will balance your wider forehead and narrow chin beautifully.",
                "**Skincare:** Vitamin C serums will help even out minor pigmentation for radiant, glowing skin.",
                "**Makeup:** Winter complexions shine with bold berry and wine-colored lips - stunning!",
            ],
        ),
    ]
}

pub fn demo_sample(id: &str) -> Option<DemoSample> {
    demo_samples().into_iter().find(|sample| sample.id == id)
}

struct Profile {
    face_shape: &'static str,
    confidence: f64,
    gender: &'static str,
    // acne, pigmentation, dryness, overall_health
    scores: [f64; 4],
    dominant_color: [u8; 3],
    undertone: &'static str,
    season: &'static str,
}

fn sample(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    image_url: &'static str,
    profile: Profile,
    recommendations: [&str; 3],
) -> DemoSample {
    let [acne, pigmentation, dryness, overall_health] = profile.scores;
    let skin_scores = BTreeMap::from([
        ("acne".to_string(), acne),
        ("pigmentation".to_string(), pigmentation),
        ("dryness".to_string(), dryness),
        ("overall_health".to_string(), overall_health),
    ]);

    DemoSample {
        id,
        name,
        description,
        image_url,
        result: AnalysisResult {
            face_shape: profile.face_shape.to_string(),
            confidence: Some(profile.confidence),
            gender: Some(profile.gender.to_string()),
            skin_scores,
            color_analysis: Some(ColorAnalysis {
                dominant_color: profile.dominant_color.to_vec(),
                undertone: Some(profile.undertone.to_string()),
                season: Some(profile.season.to_string()),
            }),
            recommendations: recommendations.iter().map(|r| r.to_string()).collect(),
            image_url: Some(image_url.to_string()),
            annotated_image_url: None,
        },
    }
}
