// Copyright 2023 RobustMQ Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use common_base::config::company_server::AuthConfig;
use common_base::error::common::CommonError;
use common_jwt::jwt_manager::{JwtTokenMaker, TokenMaker};
use log::info;

/// Builds the token maker shared by the HTTP server for its whole lifetime.
pub fn build_token_maker(config: &AuthConfig) -> Result<Arc<dyn TokenMaker>, CommonError> {
    let token_maker = JwtTokenMaker::new(&config.secret).map_err(|e| {
        CommonError::CommonError(format!("Cannot create token maker. Error: {}", e))
    })?;
    info!("Token maker ready. {:?}", token_maker);
    Ok(Arc::new(token_maker))
}
