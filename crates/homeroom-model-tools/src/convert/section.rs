use crate::convert::FromDbModel;
use homeroom_entity::class_section::Model as SectionModel;
use homeroom_model::section::Section;

impl FromDbModel<(SectionModel, i64)> for Section {
    fn from_db_model((model, student_count): (SectionModel, i64)) -> Self {
        Self {
            name: model.name(),
            id: model.id,
            year: model.year,
            letter: model.letter,
            student_count,
        }
    }
}
