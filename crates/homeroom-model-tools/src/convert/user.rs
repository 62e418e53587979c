use crate::convert::{FromDbModel, FromModel, IntoModel};
use homeroom_entity::student_profile::Model as StudentProfileModel;
use homeroom_entity::user::Model as UserModel;
use homeroom_entity::user::Role as RoleModel;
use homeroom_model::user::{Role, StudentProfile, User};

impl FromDbModel<RoleModel> for Role {
    fn from_db_model(model: RoleModel) -> Self {
        match model {
            RoleModel::Student => Self::Student,
            RoleModel::Teacher => Self::Teacher,
        }
    }
}

impl FromModel<Role> for RoleModel {
    fn from_model(model: Role) -> Self {
        match model {
            Role::Student => Self::Student,
            Role::Teacher => Self::Teacher,
        }
    }
}

impl FromDbModel<StudentProfileModel> for StudentProfile {
    fn from_db_model(model: StudentProfileModel) -> Self {
        Self {
            section_id: model.section_id,
            group: model.study_group,
            year_section: model.year_section,
        }
    }
}

impl FromDbModel<(UserModel, Option<StudentProfileModel>)> for User {
    fn from_db_model((model, profile): (UserModel, Option<StudentProfileModel>)) -> Self {
        Self {
            id: model.id,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            role: model.role.into_model(),
            profile: profile.map(IntoModel::into_model),
        }
    }
}
