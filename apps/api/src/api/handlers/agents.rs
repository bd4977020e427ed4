use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiQuery};
use crate::api::response::ApiResponse;
use crate::api::AppState;
use crate::domain::agent::{
    Agent, AgentError, AgentStatus, NewAgent, ProfileUpdate, StatusChange, StatusSummary,
};
use crate::domain::repositories::AgentFilter;

/// Request body for creating an agent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    pub agent_code: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    pub status: Option<String>,
}

/// Request body for a profile update
///
/// `agentCode` and `status` are not accepted here and are ignored if sent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub skills: Option<BTreeSet<String>>,
}

/// Request body for a status change
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
    pub reason: Option<String>,
}

/// Query string for listing agents
#[derive(Debug, Default, Deserialize)]
pub struct ListAgentsQuery {
    pub status: Option<String>,
    pub department: Option<String>,
}

impl ListAgentsQuery {
    fn into_filter(self) -> Result<AgentFilter, AgentError> {
        let status = match self.status.filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<AgentStatus>()?),
            None => None,
        };

        Ok(AgentFilter {
            status,
            department: self.department.filter(|d| !d.is_empty()),
        })
    }
}

/// External view of an agent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub id: Uuid,
    pub agent_code: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub skills: Vec<String>,
    pub status: AgentStatus,
    pub status_reason: Option<String>,
    pub status_history: Vec<StatusChange>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Agent> for AgentResponse {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id(),
            agent_code: agent.agent_code().to_string(),
            name: agent.name().to_string(),
            email: agent.email().to_string(),
            department: agent.department().to_string(),
            skills: agent.skills().iter().cloned().collect(),
            status: agent.status(),
            status_reason: agent.status_reason().map(str::to_string),
            status_history: agent.status_history().to_vec(),
            created_at: agent.created_at(),
            updated_at: agent.updated_at(),
        }
    }
}

type AgentJson = Json<ApiResponse<AgentResponse>>;

fn parse_agent_id(raw: &str) -> Result<Uuid, AgentError> {
    Uuid::parse_str(raw).map_err(|_| AgentError::NotFound(raw.to_string()))
}

/// List agents, optionally filtered by status and department
///
/// GET /api/agents
pub async fn list_agents(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListAgentsQuery>,
) -> Result<Json<ApiResponse<Vec<AgentResponse>>>, ApiError> {
    let filter = query.into_filter()?;
    let agents = state.agents.list(&filter).await?;

    let responses = agents.iter().map(AgentResponse::from).collect();

    Ok(Json(ApiResponse::success(
        "Agents retrieved successfully",
        responses,
    )))
}

/// Create a new agent
///
/// POST /api/agents
pub async fn create_agent(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateAgentRequest>,
) -> Result<(StatusCode, AgentJson), ApiError> {
    // A taken code is reported before any other field is looked at
    if state
        .agents
        .find_by_code(req.agent_code.trim())
        .await?
        .is_some()
    {
        let err = AgentError::DuplicateCode(req.agent_code.trim().to_string());
        tracing::warn!(error = %err, "agent creation rejected");
        return Err(err.into());
    }

    let status = req
        .status
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<AgentStatus>())
        .transpose()?;

    let agent = Agent::new(NewAgent {
        agent_code: req.agent_code,
        name: req.name,
        email: req.email,
        department: req.department,
        skills: req.skills,
        status,
    })?;

    let agent = state.agents.insert(agent).await.map_err(|e| {
        tracing::warn!(error = %e, "agent creation rejected");
        e
    })?;
    tracing::info!(agent_id = %agent.id(), agent_code = agent.agent_code(), "agent created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Agent created successfully",
            AgentResponse::from(&agent),
        )),
    ))
}

/// Get an agent by ID
///
/// GET /api/agents/:id
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<AgentJson, ApiError> {
    let agent_id = parse_agent_id(&id)?;
    let agent = state
        .agents
        .find_by_id(agent_id)
        .await?
        .ok_or(AgentError::NotFound(id))?;

    Ok(Json(ApiResponse::success(
        "Agent retrieved successfully",
        AgentResponse::from(&agent),
    )))
}

/// Update an agent's profile fields
///
/// PUT /api/agents/:id
pub async fn update_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateAgentRequest>,
) -> Result<AgentJson, ApiError> {
    let agent_id = parse_agent_id(&id)?;
    let update = ProfileUpdate {
        name: req.name,
        email: req.email,
        department: req.department,
        skills: req.skills,
    };

    let agent = state.agents.update_profile(agent_id, update).await?;

    Ok(Json(ApiResponse::success(
        "Agent updated successfully",
        AgentResponse::from(&agent),
    )))
}

/// Move an agent to a new status
///
/// PATCH /api/agents/:id/status
pub async fn update_agent_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateStatusRequest>,
) -> Result<AgentJson, ApiError> {
    let agent_id = parse_agent_id(&id)?;

    let agent = state
        .agents
        .transition_status(agent_id, &req.status, req.reason)
        .await
        .map_err(|e| {
            tracing::warn!(%agent_id, requested = %req.status, error = %e, "status change rejected");
            e
        })?;
    tracing::info!(%agent_id, status = %agent.status(), "agent status changed");

    Ok(Json(ApiResponse::success(
        "Agent status updated successfully",
        AgentResponse::from(&agent),
    )))
}

/// Delete an agent
///
/// DELETE /api/agents/:id
pub async fn delete_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let agent_id = parse_agent_id(&id)?;
    state.agents.delete(agent_id).await?;
    tracing::info!(%agent_id, "agent deleted");

    Ok(Json(ApiResponse::message("Agent deleted successfully")))
}

/// Status breakdown across all agents
///
/// GET /api/agents/status/summary
pub async fn get_status_summary(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatusSummary>>, ApiError> {
    let summary = state.agents.status_summary().await?;

    Ok(Json(ApiResponse::success(
        "Status summary retrieved successfully",
        summary,
    )))
}
