use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{Course, CourseEntry, Profile, Roster, Student};
use crate::pagination;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct CanvasClient {
    http: Client,
    base_url: String,
}

impl CanvasClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        context: &str,
    ) -> Result<(T, HeaderMap)> {
        debug!("GET {}", url);
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::status(context, status));
        }

        let headers = response.headers().clone();
        let body = response.json::<T>().await.map_err(ApiError::Decode)?;
        Ok((body, headers))
    }

    pub async fn current_user_id(&self) -> Result<i64> {
        let url = format!("{}/users/self/profile", self.base_url);
        let (profile, _) = self
            .get_json::<Profile>(&url, &[], "Failed to retrieve current user profile")
            .await?;
        Ok(profile.id)
    }

    pub async fn fetch_current_courses(&self) -> Result<Vec<Course>> {
        let url = format!("{}/courses", self.base_url);
        let (entries, _) = self
            .get_json::<Vec<CourseEntry>>(
                &url,
                &[("enrollment_state", "active"), ("include[]", "term")],
                "Failed to retrieve current courses",
            )
            .await?;

        let mut courses = Vec::new();
        for entry in entries {
            let id = entry.id;
            match entry.into_course() {
                Some(course) => {
                    debug!("Course {} ({}) in {}", course.id, course.name, course.term);
                    courses.push(course);
                }
                None => debug!("Skipping course {} without a term", id),
            }
        }
        Ok(courses)
    }

    pub async fn current_courses(&self) -> Vec<Course> {
        match self.fetch_current_courses().await {
            Ok(courses) => {
                info!("Found {} active courses", courses.len());
                courses
            }
            Err(err) => {
                error!("{}", err);
                Vec::new()
            }
        }
    }

    /// A failed page stops that course only; earlier pages are kept.
    pub async fn rosters(&self, course_ids: &[i64]) -> Vec<Roster> {
        let mut rosters = Vec::with_capacity(course_ids.len());

        for &course_id in course_ids {
            info!("Fetching roster for course {}", course_id);
            let students = self.roster(course_id).await;
            debug!(
                "Roster for course {}: {:?}",
                course_id,
                students.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
            );
            rosters.push(Roster {
                course_id,
                students,
            });
        }

        rosters
    }

    async fn roster(&self, course_id: i64) -> Vec<Student> {
        let context = format!("Failed to retrieve roster for course {}", course_id);
        let mut students = Vec::new();
        let mut endpoint = format!("{}/courses/{}/users", self.base_url, course_id);
        let mut query: &[(&str, &str)] =
            &[("enrollment_type", "student"), ("include[]", "avatar_url")];

        loop {
            match self
                .get_json::<Vec<Student>>(&endpoint, query, &context)
                .await
            {
                Ok((page, headers)) => {
                    students.extend(page);
                    match pagination::next_link(&headers) {
                        Some(next) => {
                            endpoint = next;
                            // next links already carry the filters
                            query = &[];
                        }
                        None => break,
                    }
                }
                Err(err) => {
                    error!("{}", err);
                    if !students.is_empty() {
                        warn!(
                            "Keeping {} students already fetched for course {}",
                            students.len(),
                            course_id
                        );
                    }
                    break;
                }
            }
        }

        students
    }
}
