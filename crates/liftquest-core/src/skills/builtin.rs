use super::tree::Skill;
use crate::catalog::BodyPart;
use crate::grading::Grade;

/// Default chest tree: push-up at the root, bench press variations at the top.
pub fn builtin_chest_skills() -> Vec<Skill> {
    vec![
        Skill::new("pushup_normal", "푸시업", BodyPart::Chest, Grade::Bronze, 1, &[]),
        Skill::new("dips", "딥스", BodyPart::Chest, Grade::Bronze, 5, &["pushup_normal"]),
        Skill::new("pec_deck_fly", "펙덱 플라이", BodyPart::Chest, Grade::Bronze, 5, &["pushup_normal"]),
        Skill::new("dumbbell_fly", "덤벨 플라이", BodyPart::Chest, Grade::Silver, 10, &["pec_deck_fly"]),
        Skill::new(
            "bench_press",
            "벤치프레스",
            BodyPart::Chest,
            Grade::Gold,
            15,
            &["dips", "dumbbell_fly"],
        ),
        Skill::new("bench_incline", "인클라인 벤치", BodyPart::Chest, Grade::Diamond, 25, &["bench_press"]),
        Skill::new(
            "cable_crossover",
            "케이블 크로스오버",
            BodyPart::Chest,
            Grade::Diamond,
            25,
            &["bench_press"],
        ),
    ]
}
