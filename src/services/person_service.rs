//! 人员服务：个人资料、查询、更新

use crate::{
    error::AppError,
    models::person::{
        parse_birth_date, CreatePersonRequest, PersonFilter, PersonResponse, ProfileResponse,
        UpdatePersonRequest,
    },
    repository::{NewPerson, PersonChanges, PersonRepository},
};
use chrono::{NaiveDate, Utc};

pub struct PersonService {
    persons: PersonRepository,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl PersonService {
    pub fn new(persons: PersonRepository) -> Self {
        Self { persons }
    }

    /// 当前账户的个人资料
    pub async fn get_account_profile(&self, account_id: i64) -> Result<ProfileResponse, AppError> {
        let person = self.persons.find_by_account_id(account_id).await?;
        Ok(ProfileResponse::from_person(&person, today()))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<PersonResponse, AppError> {
        if id <= 0 {
            return Err(AppError::NotFound("Person".to_string()));
        }
        let person = self.persons.find_by_id(id).await?;
        Ok(PersonResponse::from_person(&person, today()))
    }

    /// 列表查询，结果为空时返回 NotFound
    pub async fn list(&self, filter: &PersonFilter) -> Result<Vec<PersonResponse>, AppError> {
        let pattern = filter.keyword_pattern();
        let persons = self
            .persons
            .list(pattern.as_deref(), filter.s, filter.limit())
            .await?;

        if persons.is_empty() {
            return Err(AppError::NotFound("Person".to_string()));
        }

        let today = today();
        Ok(persons
            .iter()
            .map(|p| PersonResponse::from_person(p, today))
            .collect())
    }

    /// 更新人员信息
    ///
    /// 出生日期在写库前解析，格式错误时不修改任何数据。
    pub async fn update(&self, id: i64, req: &UpdatePersonRequest) -> Result<PersonResponse, AppError> {
        if id <= 0 {
            return Err(AppError::NotFound("Person".to_string()));
        }

        let birth_date = parse_birth_date(&req.birth_date).ok_or(AppError::DateParsing)?;

        let changes = PersonChanges {
            fullname: req.fullname.clone(),
            gender: req.gender.clone(),
            birth_date,
        };

        let person = self.persons.update(id, &changes).await?;

        tracing::info!(person_id = person.id, "Person updated");

        Ok(PersonResponse::from_person(&person, today()))
    }

    pub async fn create(&self, req: &CreatePersonRequest) -> Result<PersonResponse, AppError> {
        let birth_date = req
            .birth_date
            .as_deref()
            .map(|raw| parse_birth_date(raw).ok_or(AppError::DateParsing))
            .transpose()?;

        let person = self
            .persons
            .create(&NewPerson {
                account_id: req.account_id,
                fullname: req.fullname.clone(),
                gender: req.gender.clone(),
                birth_date,
            })
            .await?;

        tracing::info!(person_id = person.id, account_id = ?person.account_id, "Person created");

        Ok(PersonResponse::from_person(&person, today()))
    }
}
