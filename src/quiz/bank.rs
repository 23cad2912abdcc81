use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::language::Language::{Arabic, French};
use crate::quiz::Question;

/// Questions for each recognizable target, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    targets: Vec<(String, Vec<Question>)>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wonders shipped with the tour.
    pub fn builtin() -> Arc<QuestionBank> {
        BUILTIN.clone()
    }

    /// Adds (or replaces) the questions for `target`.
    pub fn with_target(mut self, target: impl Into<String>, questions: Vec<Question>) -> Self {
        let target = target.into();
        match self.targets.iter_mut().find(|(id, _)| *id == target) {
            Some((_, existing)) => *existing = questions,
            None => self.targets.push((target, questions)),
        }
        self
    }

    /// Unknown targets have no questions; that is not an error.
    pub fn questions_for(&self, target: &str) -> &[Question] {
        self.targets
            .iter()
            .find(|(id, _)| id == target)
            .map(|(_, questions)| questions.as_slice())
            .unwrap_or_default()
    }

    pub fn contains(&self, target: &str) -> bool {
        !self.questions_for(target).is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|(id, _)| id.as_str())
    }
}

static BUILTIN: Lazy<Arc<QuestionBank>> = Lazy::new(|| {
    Arc::new(
        QuestionBank::new()
            .with_target("TajMahal", taj_mahal())
            .with_target("ChichenItza", chichen_itza())
            .with_target("AbulHol", abul_hol())
            .with_target("Colosseum", colosseum())
            .with_target("GreatWallOfChina", great_wall())
            .with_target("Pyramid", pyramid()),
    )
});

fn taj_mahal() -> Vec<Question> {
    vec![
        Question::new(
            "In which Indian city is the Taj Mahal located?",
            ["Agra", "Delhi", "Jaipur", "Mumbai"],
            0,
        )
        .translated(
            French,
            "Dans quelle ville indienne se trouve le Taj Mahal ?",
            ["Agra", "Delhi", "Jaipur", "Mumbai"],
        )
        .translated(
            Arabic,
            "في أي مدينة هندية يقع تاج محل؟",
            ["أغرا", "دلهي", "جايبور", "مومباي"],
        ),
        Question::new(
            "Who commissioned the Taj Mahal?",
            ["Shah Jahan", "Akbar", "Aurangzeb", "Humayun"],
            0,
        )
        .translated(
            French,
            "Qui a commandé la construction du Taj Mahal ?",
            ["Shah Jahan", "Akbar", "Aurangzeb", "Humayun"],
        )
        .translated(
            Arabic,
            "من أمر ببناء تاج محل؟",
            ["شاه جهان", "أكبر", "أورانجزيب", "همايون"],
        ),
        Question::new(
            "What material is the Taj Mahal primarily built from?",
            ["White marble", "Red sandstone", "Granite", "Limestone"],
            0,
        )
        .translated(
            French,
            "De quel matériau le Taj Mahal est-il principalement construit ?",
            ["Marbre blanc", "Grès rouge", "Granit", "Calcaire"],
        )
        .translated(
            Arabic,
            "ما هي المادة الرئيسية التي بني منها تاج محل؟",
            ["رخام أبيض", "حجر رملي أحمر", "جرانيت", "حجر جيري"],
        ),
    ]
}

fn chichen_itza() -> Vec<Question> {
    vec![
        Question::new(
            "In which country is Chichen Itza located?",
            ["Mexico", "Guatemala", "Peru", "Honduras"],
            0,
        )
        .translated(
            French,
            "Dans quel pays se trouve Chichen Itza ?",
            ["Mexique", "Guatemala", "Pérou", "Honduras"],
        )
        .translated(
            Arabic,
            "في أي بلد يقع تشيتشن إيتزا؟",
            ["المكسيك", "غواتيمالا", "بيرو", "هندوراس"],
        ),
        Question::new(
            "Which ancient civilization built Chichen Itza?",
            ["Maya", "Aztec", "Inca", "Olmec"],
            0,
        )
        .translated(
            French,
            "Quelle civilisation ancienne a construit Chichen Itza ?",
            ["Maya", "Aztèque", "Inca", "Olmèque"],
        )
        .translated(
            Arabic,
            "أي حضارة قديمة بنت تشيتشن إيتزا؟",
            ["المايا", "الأزتيك", "الإنكا", "الأولمك"],
        ),
        Question::new(
            "What is the main pyramid at Chichen Itza called?",
            ["El Castillo", "La Iglesia", "El Caracol", "El Mercado"],
            0,
        )
        .translated(
            French,
            "Comment s'appelle la pyramide principale de Chichen Itza ?",
            ["El Castillo", "La Iglesia", "El Caracol", "El Mercado"],
        )
        .translated(
            Arabic,
            "ما هو اسم الهرم الرئيسي في تشيتشن إيتزا؟",
            ["إل كاستيو", "لا إغليسيا", "إل كاراكول", "إل ميركادو"],
        ),
    ]
}

// The Great Sphinx of Giza.
fn abul_hol() -> Vec<Question> {
    vec![
        Question::new(
            "Where is the Great Sphinx (Abul-Hol) located?",
            ["Giza, Egypt", "Cairo, Egypt", "Luxor, Egypt", "Alexandria, Egypt"],
            0,
        )
        .translated(
            French,
            "Où se trouve le Grand Sphinx (Abul-Hol) ?",
            ["Gizeh, Égypte", "Le Caire, Égypte", "Louxor, Égypte", "Alexandrie, Égypte"],
        )
        .translated(
            Arabic,
            "أين يقع أبو الهول؟",
            ["الجيزة، مصر", "القاهرة، مصر", "الأقصر، مصر", "الإسكندرية، مصر"],
        ),
        Question::new(
            "What is the Sphinx (Abul-Hol) a combination of?",
            [
                "Human head and lion body",
                "Human head and eagle wings",
                "Lion head and human body",
                "Human head and bull body",
            ],
            0,
        )
        .translated(
            French,
            "Le Sphinx (Abul-Hol) est une combinaison de quoi ?",
            [
                "Tête humaine et corps de lion",
                "Tête humaine et ailes d'aigle",
                "Tête de lion et corps humain",
                "Tête humaine et corps de taureau",
            ],
        )
        .translated(
            Arabic,
            "ما هي المكونات التي يجمع بينها أبو الهول؟",
            [
                "رأس إنسان وجسم أسد",
                "رأس إنسان وأجنحة نسر",
                "رأس أسد وجسم إنسان",
                "رأس إنسان وجسم ثور",
            ],
        ),
        Question::new(
            "During which pharaoh's reign is the Sphinx believed to have been built?",
            ["Khafre", "Khufu", "Tutankhamun", "Ramses II"],
            0,
        )
        .translated(
            French,
            "Sous le règne de quel pharaon pense-t-on que le Sphinx a été construit ?",
            ["Khafrê", "Khéops", "Toutânkhamon", "Ramsès II"],
        )
        .translated(
            Arabic,
            "في عهد أي فرعون يُعتقد أنه تم بناء أبو الهول؟",
            ["خفرع", "خوفو", "توت عنخ آمون", "رمسيس الثاني"],
        ),
    ]
}

fn colosseum() -> Vec<Question> {
    vec![
        Question::new(
            "In which city is the Colosseum located?",
            ["Rome", "Athens", "Milan", "Naples"],
            0,
        )
        .translated(
            French,
            "Dans quelle ville se trouve le Colisée ?",
            ["Rome", "Athènes", "Milan", "Naples"],
        )
        .translated(
            Arabic,
            "في أي مدينة يقع الكولوسيوم؟",
            ["روما", "أثينا", "ميلانو", "نابولي"],
        ),
        Question::new(
            "When was the Colosseum completed?",
            ["80 AD", "50 AD", "120 AD", "200 AD"],
            0,
        )
        .translated(
            French,
            "Quand le Colisée a-t-il été achevé ?",
            ["80 après J.-C.", "50 après J.-C.", "120 après J.-C.", "200 après J.-C."],
        )
        .translated(
            Arabic,
            "متى تم الانتهاء من بناء الكولوسيوم؟",
            ["80 ميلادي", "50 ميلادي", "120 ميلادي", "200 ميلادي"],
        ),
        Question::new(
            "What was the original name of the Colosseum?",
            [
                "Flavian Amphitheatre",
                "Roman Arena",
                "Imperial Stadium",
                "Julius Caesar Theatre",
            ],
            0,
        )
        .translated(
            French,
            "Quel était le nom original du Colisée ?",
            [
                "Amphithéâtre Flavien",
                "Arène Romaine",
                "Stade Impérial",
                "Théâtre de Jules César",
            ],
        )
        .translated(
            Arabic,
            "ما هو الاسم الأصلي للكولوسيوم؟",
            ["مدرج فلافيان", "حلبة رومانية", "الملعب الإمبراطوري", "مسرح يوليوس قيصر"],
        ),
    ]
}

fn great_wall() -> Vec<Question> {
    vec![
        Question::new(
            "During which dynasty did the majority of the Great Wall's construction take place?",
            ["Ming", "Han", "Tang", "Song"],
            0,
        )
        .translated(
            French,
            "Pendant quelle dynastie la majeure partie de la construction de la Grande Muraille a-t-elle eu lieu ?",
            ["Ming", "Han", "Tang", "Song"],
        )
        .translated(
            Arabic,
            "في أي سلالة حاكمة تم بناء الجزء الأكبر من سور الصين العظيم؟",
            ["مينغ", "هان", "تانغ", "سونغ"],
        ),
        Question::new(
            "What was the primary purpose of building the Great Wall of China?",
            [
                "Defense against invasions",
                "Trade route marker",
                "Religious boundary",
                "Imperial showcase",
            ],
            0,
        )
        .translated(
            French,
            "Quel était l'objectif principal de la construction de la Grande Muraille de Chine ?",
            [
                "Défense contre les invasions",
                "Marqueur de route commerciale",
                "Frontière religieuse",
                "Vitrine impériale",
            ],
        )
        .translated(
            Arabic,
            "ما كان الغرض الأساسي من بناء سور الصين العظيم؟",
            ["الدفاع ضد الغزوات", "علامة للطرق التجارية", "حدود دينية", "واجهة إمبراطورية"],
        ),
        Question::new(
            "Approximately how long is the Great Wall of China?",
            ["21,196 kilometers", "10,000 kilometers", "5,000 kilometers", "30,000 kilometers"],
            0,
        )
        .translated(
            French,
            "Quelle est la longueur approximative de la Grande Muraille de Chine ?",
            ["21 196 kilomètres", "10 000 kilomètres", "5 000 kilomètres", "30 000 kilomètres"],
        )
        .translated(
            Arabic,
            "ما هو الطول التقريبي لسور الصين العظيم؟",
            ["21,196 كيلومتر", "10,000 كيلومتر", "5,000 كيلومتر", "30,000 كيلومتر"],
        ),
    ]
}

// The Great Pyramid of Giza.
fn pyramid() -> Vec<Question> {
    vec![
        Question::new(
            "Which is the largest of the Egyptian pyramids?",
            [
                "Great Pyramid of Giza",
                "Pyramid of Khafre",
                "Pyramid of Menkaure",
                "Red Pyramid",
            ],
            0,
        )
        .translated(
            French,
            "Quelle est la plus grande des pyramides égyptiennes ?",
            [
                "Grande Pyramide de Gizeh",
                "Pyramide de Khéphren",
                "Pyramide de Mykérinos",
                "Pyramide Rouge",
            ],
        )
        .translated(
            Arabic,
            "ما هو أكبر الأهرامات المصرية؟",
            ["هرم خوفو الأكبر", "هرم خفرع", "هرم منقرع", "الهرم الأحمر"],
        ),
        Question::new(
            "What were Egyptian pyramids primarily built as?",
            ["Tombs", "Temples", "Observatories", "Palaces"],
            0,
        )
        .translated(
            French,
            "À quoi servaient principalement les pyramides égyptiennes ?",
            ["Tombeaux", "Temples", "Observatoires", "Palais"],
        )
        .translated(
            Arabic,
            "ما هو الغرض الرئيسي من بناء الأهرامات المصرية؟",
            ["مقابر", "معابد", "مراصد", "قصور"],
        ),
        Question::new(
            "Who is believed to have built the Great Pyramid of Giza?",
            ["Khufu", "Khafre", "Menkaure", "Djoser"],
            0,
        )
        .translated(
            French,
            "Qui pense-t-on avoir construit la Grande Pyramide de Gizeh ?",
            ["Khéops", "Khéphren", "Mykérinos", "Djéser"],
        )
        .translated(
            Arabic,
            "من يُعتقد أنه بنى الهرم الأكبر في الجيزة؟",
            ["خوفو", "خفرع", "منقرع", "زوسر"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use crate::quiz::ANSWER_SLOTS;

    #[test]
    fn builtin_has_six_wonders_in_order() {
        let bank = QuestionBank::builtin();
        let targets: Vec<&str> = bank.targets().collect();
        assert_eq!(
            targets,
            vec![
                "TajMahal",
                "ChichenItza",
                "AbulHol",
                "Colosseum",
                "GreatWallOfChina",
                "Pyramid"
            ]
        );
    }

    #[test]
    fn every_builtin_question_is_fully_translated() {
        let bank = QuestionBank::builtin();
        for target in bank.targets() {
            let questions = bank.questions_for(target);
            assert_eq!(questions.len(), 3, "{}", target);
            for question in questions {
                for language in Language::ALL {
                    assert!(question.has_translation(language), "{} {}", target, language);
                    assert_eq!(question.options_in(language).len(), ANSWER_SLOTS);
                }
                assert!(question.correct_index() < ANSWER_SLOTS);
            }
        }
    }

    #[test]
    fn unknown_target_has_no_questions() {
        let bank = QuestionBank::builtin();
        assert!(bank.questions_for("Atlantis").is_empty());
        assert!(!bank.contains("Atlantis"));
        assert!(bank.contains("TajMahal"));
        // Lookup is exact.
        assert!(bank.questions_for("tajmahal").is_empty());
    }

    #[test]
    fn with_target_replaces_existing_entry() {
        let q = Question::new("Q", ["a", "b", "c", "d"], 2);
        let bank = QuestionBank::new()
            .with_target("Stonehenge", vec![q.clone(), q.clone()])
            .with_target("Stonehenge", vec![q]);
        assert_eq!(bank.questions_for("Stonehenge").len(), 1);
        assert_eq!(bank.targets().count(), 1);
    }

    #[test]
    fn builtin_is_shared() {
        assert!(Arc::ptr_eq(&QuestionBank::builtin(), &QuestionBank::builtin()));
    }
}
