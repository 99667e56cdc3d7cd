// src/services/question_bank.rs

use std::collections::HashMap;

use crate::models::{
    question::{AnswerOption, QuizQuestion},
    subject::Subject,
};

/// Read-only question lookup keyed by subject.
///
/// Questions keep the order in which they were authored; `quiz_for` always
/// slices from the front, so the same subject yields the same quiz.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    by_subject: HashMap<Subject, Vec<QuizQuestion>>,
}

impl QuestionBank {
    /// Builds a bank from an explicit list, grouping by subject and keeping list order.
    pub fn from_questions(questions: impl IntoIterator<Item = QuizQuestion>) -> Self {
        let mut by_subject: HashMap<Subject, Vec<QuizQuestion>> = HashMap::new();
        for question in questions {
            by_subject.entry(question.subject).or_default().push(question);
        }
        Self { by_subject }
    }

    /// The bank shipped with the application.
    pub fn builtin() -> Self {
        Self::from_questions(math_questions().into_iter().chain(english_questions()))
    }

    /// All questions authored for `subject`, empty when there are none.
    pub fn questions_for(&self, subject: Subject) -> &[QuizQuestion] {
        self.by_subject
            .get(&subject)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The first `limit` questions of `subject`.
    pub fn quiz_for(&self, subject: Subject, limit: usize) -> Vec<QuizQuestion> {
        self.questions_for(subject)
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }
}

fn question(
    id: &str,
    subject: Subject,
    text: &str,
    options: [(&str, &str); 4],
    correct: &str,
) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        subject,
        text: text.to_string(),
        image_url: None,
        hint: None,
        options: options
            .into_iter()
            .map(|(id, text)| AnswerOption::new(id, text))
            .collect(),
        correct_answer_id: correct.to_string(),
    }
}

fn illustrated(mut q: QuizQuestion, image_url: &str, hint: &str) -> QuizQuestion {
    q.image_url = Some(image_url.to_string());
    q.hint = Some(hint.to_string());
    q
}

fn math_questions() -> Vec<QuizQuestion> {
    use Subject::Math;

    vec![
        question("m1", Math, "What is 7 + 8?", [("a", "14"), ("b", "15"), ("c", "16"), ("d", "13")], "b"),
        question("m2", Math, "What is 9 x 6?", [("a", "54"), ("b", "56"), ("c", "45"), ("d", "63")], "a"),
        question("m3", Math, "What is 144 / 12?", [("a", "11"), ("b", "14"), ("c", "12"), ("d", "13")], "c"),
        illustrated(
            question("m4", Math, "How many sides does a hexagon have?", [("a", "5"), ("b", "8"), ("c", "7"), ("d", "6")], "d"),
            "https://placehold.co/600x400.png",
            "hexagon shape",
        ),
        question("m5", Math, "What is 25% of 80?", [("a", "20"), ("b", "25"), ("c", "16"), ("d", "40")], "a"),
        question("m6", Math, "Which number is prime?", [("a", "21"), ("b", "27"), ("c", "29"), ("d", "33")], "c"),
        question("m7", Math, "What is the square root of 81?", [("a", "8"), ("b", "9"), ("c", "7"), ("d", "81")], "b"),
        question("m8", Math, "Solve for x: 3x - 4 = 11", [("a", "3"), ("b", "4"), ("c", "6"), ("d", "5")], "d"),
        illustrated(
            question("m9", Math, "What is the sum of the interior angles of a triangle?", [("a", "180 degrees"), ("b", "90 degrees"), ("c", "360 degrees"), ("d", "270 degrees")], "a"),
            "https://placehold.co/600x400.png",
            "triangle angles",
        ),
        question("m10", Math, "What is 2 to the power of 5?", [("a", "10"), ("b", "25"), ("c", "32"), ("d", "64")], "c"),
        question("m11", Math, "Which fraction equals 0.75?", [("a", "2/3"), ("b", "3/4"), ("c", "7/10"), ("d", "4/5")], "b"),
        question("m12", Math, "What is the perimeter of a square with side 6?", [("a", "24"), ("b", "36"), ("c", "12"), ("d", "18")], "a"),
    ]
}

fn english_questions() -> Vec<QuizQuestion> {
    use Subject::English;

    vec![
        question("e1", English, "Which word is a synonym of 'happy'?", [("a", "Sad"), ("b", "Joyful"), ("c", "Angry"), ("d", "Tired")], "b"),
        question("e2", English, "Choose the correct spelling.", [("a", "Recieve"), ("b", "Receve"), ("c", "Receive"), ("d", "Riceive")], "c"),
        question("e3", English, "What is the plural of 'child'?", [("a", "Childs"), ("b", "Childes"), ("c", "Childrens"), ("d", "Children")], "d"),
        question("e4", English, "Which word is an adverb?", [("a", "Quickly"), ("b", "Quick"), ("c", "Quicken"), ("d", "Quickness")], "a"),
        question("e5", English, "Pick the correct sentence.", [("a", "She don't like tea."), ("b", "She doesn't like tea."), ("c", "She not like tea."), ("d", "She doesn't likes tea.")], "b"),
        illustrated(
            question("e6", English, "Which word is the antonym of 'ancient'?", [("a", "Old"), ("b", "Historic"), ("c", "Modern"), ("d", "Aged")], "c"),
            "https://placehold.co/600x400.png",
            "ancient ruins",
        ),
        question("e7", English, "What is the past tense of 'run'?", [("a", "Runned"), ("b", "Ran"), ("c", "Running"), ("d", "Runs")], "b"),
        question("e8", English, "Which of these is a proper noun?", [("a", "city"), ("b", "river"), ("c", "London"), ("d", "mountain")], "c"),
        question("e9", English, "Fill in the blank: 'They ___ going to the park.'", [("a", "is"), ("b", "am"), ("c", "was"), ("d", "are")], "d"),
        question("e10", English, "Which punctuation mark ends a question?", [("a", "?"), ("b", "!"), ("c", "."), ("d", ";")], "a"),
    ]
}
